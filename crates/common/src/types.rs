use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV bar. `time` is the bucket open in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self { time, open, high, low, close, volume }
    }

    /// Midpoint of the bar's range, `(high + low) / 2`.
    pub fn mid(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// Live market data event from a feed.
/// A pair's forming candle is re-sent with the same `time` on every update;
/// `is_candle_closed` flips to true once the bucket is final.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketEvent {
    pub pair: String,
    pub candle: Candle,
    pub is_candle_closed: bool,
}

/// Direction of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalType {
    Long,
    Short,
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalType::Long => write!(f, "LONG"),
            SignalType::Short => write!(f, "SHORT"),
        }
    }
}

/// Lifecycle state of a signal. The engine only ever emits `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalStatus {
    #[default]
    Active,
    HitTp,
    HitSl,
    Pending,
}

impl std::fmt::Display for SignalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalStatus::Active => write!(f, "ACTIVE"),
            SignalStatus::HitTp => write!(f, "HIT_TP"),
            SignalStatus::HitSl => write!(f, "HIT_SL"),
            SignalStatus::Pending => write!(f, "PENDING"),
        }
    }
}

/// Which of the three mutually exclusive strategies drives signal generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum StrategyKind {
    #[default]
    Trend,
    Reversal,
    Momentum,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Trend => write!(f, "TREND"),
            StrategyKind::Reversal => write!(f, "REVERSAL"),
            StrategyKind::Momentum => write!(f, "MOMENTUM"),
        }
    }
}

/// A priced, scored trading signal tied to the candle that triggered it.
///
/// Created once by the engine and never mutated afterwards. Outcome tracking
/// produces a separate status rather than editing the signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub id: String,
    pub candle_time: i64,
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub status: SignalStatus,
    pub reason: String,
    /// Heuristic conviction score, clamped to `[30, 98]` on emission.
    pub confidence: u8,
}

impl Signal {
    /// Deterministic id for the signal emitted at `candle_time` in `signal_type`'s
    /// direction. Recomputing over the same candles yields the same id.
    pub fn id_for(candle_time: i64, signal_type: SignalType) -> String {
        let key = format!("{candle_time}:{signal_type}");
        uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, key.as_bytes()).to_string()
    }

    /// Open time of the triggering candle; `None` outside chrono's range.
    pub fn candle_timestamp(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.candle_time).single()
    }
}
