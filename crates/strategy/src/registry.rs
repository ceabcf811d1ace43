use std::collections::HashMap;

use tokio::sync::broadcast;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use common::{validate_candles, Candle, MarketEvent, Result, Signal};

use crate::config::SignalConfig;
use crate::cooldown::{candle_duration, Cooldown};
use crate::engine::compute_signals;
use crate::params::SensitivityParams;

/// Per-pair state: rolling candle window, engine config and the ids already
/// handed out to consumers (with their candle time, for pruning).
///
/// `last_published` is the newest candle time handed out. Once the window is
/// full each trim shifts the engine's scan start, so a rerun can surface
/// signals older than that mark; those are never published.
#[derive(Debug, Default)]
struct PairState {
    candles: Vec<Candle>,
    config: SignalConfig,
    published: HashMap<String, i64>,
    last_published: Option<i64>,
}

impl PairState {
    fn new(config: SignalConfig) -> Self {
        Self { config, ..Self::default() }
    }

    fn trim(&mut self, max_history: usize) {
        if self.candles.len() > max_history {
            let excess = self.candles.len() - max_history;
            self.candles.drain(..excess);
        }
        if let Some(first) = self.candles.first() {
            let oldest = first.time;
            self.published.retain(|_, time| *time >= oldest);
        }
    }

    fn recompute(&self) -> Vec<Signal> {
        compute_signals(&self.candles, &self.config)
    }

    fn mark_published(&mut self, signals: &[Signal]) {
        for s in signals {
            self.published.insert(s.id.clone(), s.candle_time);
            self.last_published = self.last_published.max(Some(s.candle_time));
        }
    }

    /// Signals from a fresh run that are newer than anything published and
    /// clear the cooldown measured from the last published one.
    fn unseen(&mut self) -> Vec<Signal> {
        let params = SensitivityParams::derive(self.config.sensitivity);
        let mut cooldown = Cooldown::new(params.cooldown_candles, candle_duration(&self.candles))
            .resume_after(self.last_published);
        let last = self.last_published;
        let fresh: Vec<Signal> = self
            .recompute()
            .into_iter()
            .filter(|s| !self.published.contains_key(&s.id))
            .filter(|s| last.map_or(true, |t| s.candle_time > t))
            .filter(|s| cooldown.admit(s.candle_time))
            .collect();
        self.mark_published(&fresh);
        fresh
    }
}

/// Keeps a rolling candle window per pair and reruns the signal engine as
/// market events arrive, publishing each signal id at most once.
pub struct SignalRegistry {
    pairs: HashMap<String, PairState>,
    default_config: SignalConfig,
    max_history: usize,
    closed_only: bool,
}

impl SignalRegistry {
    pub const DEFAULT_MAX_HISTORY: usize = 1000;

    pub fn new(default_config: SignalConfig) -> Self {
        Self {
            pairs: HashMap::new(),
            default_config,
            max_history: Self::DEFAULT_MAX_HISTORY,
            closed_only: false,
        }
    }

    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history.max(1);
        self
    }

    /// Only closed candles trigger evaluation; forming candles still update
    /// the window.
    pub fn closed_only(mut self, closed_only: bool) -> Self {
        self.closed_only = closed_only;
        self
    }

    pub fn window(&self, pair: &str) -> &[Candle] {
        self.pairs.get(pair).map(|p| p.candles.as_slice()).unwrap_or_default()
    }

    /// Replace the pair's window with `candles` and return the full signal
    /// list. Everything returned counts as published.
    pub fn load_history(&mut self, pair: &str, candles: Vec<Candle>) -> Result<Vec<Signal>> {
        validate_candles(&candles)?;
        let max = self.max_history;
        let state = self.state_mut(pair);
        state.candles = candles;
        state.published.clear();
        state.last_published = None;
        state.trim(max);
        let signals = state.recompute();
        state.mark_published(&signals);
        info!(pair, candles = state.candles.len(), signals = signals.len(), "History loaded");
        Ok(signals)
    }

    /// Reconfigure one pair and return its recomputed signal list.
    pub fn set_config(&mut self, pair: &str, config: SignalConfig) -> Result<Vec<Signal>> {
        config.validate()?;
        info!(pair, strategy = %config.strategy, sensitivity = config.sensitivity, "Signal config updated");
        let state = self.state_mut(pair);
        state.config = config;
        let signals = state.recompute();
        state.mark_published(&signals);
        Ok(signals)
    }

    /// Fold one market event into its pair's window and return the signals
    /// that have not been published for that pair before.
    pub fn process(&mut self, event: &MarketEvent) -> Vec<Signal> {
        let max = self.max_history;
        let closed_only = self.closed_only;
        let state = self.state_mut(&event.pair);
        let candle = event.candle;

        match state.candles.last().map(|c| c.time) {
            Some(last) if candle.time < last => {
                warn!(pair = %event.pair, time = candle.time, last, "Out-of-order candle ignored");
                return Vec::new();
            }
            Some(last) if candle.time == last => {
                if let Some(forming) = state.candles.last_mut() {
                    *forming = candle;
                }
            }
            _ => state.candles.push(candle),
        }
        state.trim(max);

        if closed_only && !event.is_candle_closed {
            return Vec::new();
        }

        let fresh = state.unseen();
        if !fresh.is_empty() {
            debug!(pair = %event.pair, count = fresh.len(), "New signals");
        }
        fresh
    }

    /// Dispatch loop: consume market events, forward new signals.
    /// Returns when either channel closes.
    pub async fn run(
        mut self,
        mut market_rx: broadcast::Receiver<MarketEvent>,
        signal_tx: mpsc::Sender<Signal>,
    ) {
        info!(closed_only = self.closed_only, "SignalRegistry running");
        loop {
            match market_rx.recv().await {
                Ok(event) => {
                    for signal in self.process(&event) {
                        if signal_tx.send(signal).await.is_err() {
                            warn!("Signal channel closed, stopping signal registry");
                            return;
                        }
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(dropped = n, "Signal registry lagged, dropped market events");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    info!("Market broadcast channel closed");
                    return;
                }
            }
        }
    }

    fn state_mut(&mut self, pair: &str) -> &mut PairState {
        self.pairs
            .entry(pair.to_string())
            .or_insert_with(|| PairState::new(self.default_config.clone()))
    }
}
