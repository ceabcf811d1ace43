use serde::Serialize;
use tracing::debug;

use common::{Candle, Signal, SignalStatus, SignalType};

/// Walk the candles after the signal's own candle and report whether the
/// stop or the target was touched first.
///
/// When one candle spans both levels the stop wins; intra-candle ordering is
/// unknown and the conservative reading is the loss.
pub fn resolve_outcome(signal: &Signal, candles: &[Candle]) -> SignalStatus {
    for candle in candles.iter().filter(|c| c.time > signal.candle_time) {
        let (stopped, target_hit) = match signal.signal_type {
            SignalType::Long => (candle.low <= signal.stop_loss, candle.high >= signal.take_profit),
            SignalType::Short => (candle.high >= signal.stop_loss, candle.low <= signal.take_profit),
        };
        if stopped {
            debug!(id = %signal.id, time = candle.time, "Stop-loss touched");
            return SignalStatus::HitSl;
        }
        if target_hit {
            debug!(id = %signal.id, time = candle.time, "Take-profit touched");
            return SignalStatus::HitTp;
        }
    }
    SignalStatus::Active
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeSummary {
    pub wins: usize,
    pub losses: usize,
    pub open: usize,
}

impl OutcomeSummary {
    pub fn total(&self) -> usize {
        self.wins + self.losses + self.open
    }

    /// Wins over resolved signals; `None` while nothing has resolved.
    pub fn win_rate(&self) -> Option<f64> {
        let resolved = self.wins + self.losses;
        (resolved > 0).then(|| self.wins as f64 / resolved as f64)
    }
}

pub fn summarize(signals: &[Signal], candles: &[Candle]) -> OutcomeSummary {
    signals.iter().fold(OutcomeSummary::default(), |mut acc, signal| {
        match resolve_outcome(signal, candles) {
            SignalStatus::HitTp => acc.wins += 1,
            SignalStatus::HitSl => acc.losses += 1,
            SignalStatus::Active | SignalStatus::Pending => acc.open += 1,
        }
        acc
    })
}
