use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use common::{Candle, MarketEvent, MarketFeed, Result};

/// Chance per candle that the market switches regime.
const REGIME_SWITCH_PROBABILITY: f64 = 0.03;
const BASE_VOLUME: f64 = 1_000.0;

/// Drift and volatility per candle for each market mood.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Regime {
    Calm,
    Bull,
    Bear,
    Choppy,
}

impl Regime {
    fn drift(&self) -> f64 {
        match self {
            Regime::Calm => 0.0,
            Regime::Bull => 0.002,
            Regime::Bear => -0.002,
            Regime::Choppy => 0.0,
        }
    }

    fn volatility(&self) -> f64 {
        match self {
            Regime::Calm => 0.004,
            Regime::Bull | Regime::Bear => 0.008,
            Regime::Choppy => 0.015,
        }
    }

    fn random(rng: &mut StdRng) -> Self {
        match rng.gen_range(0..4) {
            0 => Regime::Calm,
            1 => Regime::Bull,
            2 => Regime::Bear,
            _ => Regime::Choppy,
        }
    }
}

/// Seeded geometric random walk that produces OHLCV candles at a fixed
/// interval. The same seed always yields the same market.
///
/// As a [`MarketFeed`] each candle is delivered as `ticks_per_candle`
/// updates: forming candles sharing one `time`, the last one closed.
pub struct CandleSimulator {
    pair: String,
    rng: StdRng,
    interval_ms: i64,
    ticks_per_candle: usize,
    next_time: i64,
    price: f64,
    regime: Regime,
    forming: Option<Forming>,
    remaining: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct Forming {
    candle: Candle,
    tick: usize,
}

impl CandleSimulator {
    pub fn new(pair: impl Into<String>, seed: u64) -> Self {
        Self {
            pair: pair.into(),
            rng: StdRng::seed_from_u64(seed),
            interval_ms: 60_000,
            ticks_per_candle: 1,
            next_time: 0,
            price: 100.0,
            regime: Regime::Calm,
            forming: None,
            remaining: None,
        }
    }

    pub fn with_interval_ms(mut self, interval_ms: i64) -> Self {
        self.interval_ms = interval_ms.max(1);
        self
    }

    pub fn with_start_price(mut self, price: f64) -> Self {
        if price.is_finite() && price > 0.0 {
            self.price = price;
        }
        self
    }

    pub fn with_start_time(mut self, time: i64) -> Self {
        self.next_time = time;
        self
    }

    pub fn with_ticks_per_candle(mut self, ticks: usize) -> Self {
        self.ticks_per_candle = ticks.max(1);
        self
    }

    /// Stop the feed after `candles` more closed candles.
    pub fn with_limit(mut self, candles: usize) -> Self {
        self.remaining = Some(candles);
        self
    }

    /// Generate `n` closed candles, advancing the simulator. Live events
    /// continue where the history stops.
    pub fn history(&mut self, n: usize) -> Vec<Candle> {
        let mut out = Vec::with_capacity(n);
        while out.len() < n {
            let (candle, closed) = self.step();
            if closed {
                out.push(candle);
            }
        }
        info!(pair = %self.pair, candles = n, last_close = self.price, "Simulated history");
        out
    }

    /// Advance one tick. Returns the candle as it stands and whether it closed.
    fn step(&mut self) -> (Candle, bool) {
        let mut forming = match self.forming.take() {
            Some(f) => f,
            None => self.open_candle(),
        };

        let dt = 1.0 / self.ticks_per_candle as f64;
        let (mu, sigma) = (self.regime.drift(), self.regime.volatility());
        let z = standard_normal(&mut self.rng);
        let ret = (mu - 0.5 * sigma * sigma) * dt + sigma * dt.sqrt() * z;
        self.price *= ret.exp();

        let c = &mut forming.candle;
        c.close = self.price;
        c.high = c.high.max(self.price);
        c.low = c.low.min(self.price);
        c.volume += BASE_VOLUME * dt * (1.0 + 50.0 * ret.abs()) * self.rng.gen_range(0.5..1.5);
        forming.tick += 1;

        if forming.tick >= self.ticks_per_candle {
            let mut closed = forming.candle;
            // wicks beyond the body
            let spread = sigma * 0.5 * self.rng.gen_range(0.0..1.0);
            closed.high *= 1.0 + spread;
            closed.low *= 1.0 - spread;
            self.next_time += self.interval_ms;
            self.maybe_switch_regime();
            (closed, true)
        } else {
            self.forming = Some(forming);
            (forming.candle, false)
        }
    }

    fn open_candle(&mut self) -> Forming {
        let open = self.price;
        Forming { candle: Candle::new(self.next_time, open, open, open, open, 0.0), tick: 0 }
    }

    fn maybe_switch_regime(&mut self) {
        if self.rng.gen_bool(REGIME_SWITCH_PROBABILITY) {
            let next = Regime::random(&mut self.rng);
            if next != self.regime {
                debug!(pair = %self.pair, from = ?self.regime, to = ?next, "Regime switch");
                self.regime = next;
            }
        }
    }
}

#[async_trait]
impl MarketFeed for CandleSimulator {
    async fn next_event(&mut self) -> Result<Option<MarketEvent>> {
        if self.remaining == Some(0) && self.forming.is_none() {
            return Ok(None);
        }
        let (candle, closed) = self.step();
        if closed {
            if let Some(left) = self.remaining.as_mut() {
                *left = left.saturating_sub(1);
            }
        }
        Ok(Some(MarketEvent { pair: self.pair.clone(), candle, is_candle_closed: closed }))
    }
}

/// Box-Muller transform over two uniforms.
fn standard_normal(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}
