use tracing::{debug, trace};

use common::{Candle, Signal, SignalStatus};
use risk::RiskSizer;

use crate::config::SignalConfig;
use crate::cooldown::{candle_duration, Cooldown};
use crate::evaluator::evaluator_for;
use crate::filters::FilterChain;
use crate::market::IndicatorSet;
use crate::params::SensitivityParams;
use crate::scoring::confidence;

/// No candle before this index is evaluated, so every indicator (EMA200 in
/// particular) has warmed up.
pub const WARMUP_CANDLES: usize = 200;

/// Scan `candles` oldest to newest and return every signal the configured
/// strategy emits, in candle order.
///
/// Stateless and infallible: indicators are recomputed from scratch on every
/// call, and running over a superset of the same history reproduces the same
/// trailing signals with the same ids. Fewer than `WARMUP_CANDLES` candles
/// yields an empty list.
pub fn compute_signals(candles: &[Candle], config: &SignalConfig) -> Vec<Signal> {
    if candles.len() < WARMUP_CANDLES {
        return Vec::new();
    }

    let params = SensitivityParams::derive(config.sensitivity);
    let ind = IndicatorSet::compute(candles, config, &params);
    let evaluate = evaluator_for(config.strategy);
    let filters = FilterChain::from_config(config);
    let sizer = RiskSizer::new(config.risk_reward);
    let mut cooldown = Cooldown::new(params.cooldown_candles, candle_duration(candles));

    let mut signals = Vec::new();
    for i in WARMUP_CANDLES..candles.len() {
        let Some(mut candidate) = evaluate(candles, &ind, &params, i) else {
            continue;
        };
        let candle = &candles[i];

        if let Err(veto) = filters.apply(&mut candidate, candles, &ind, i) {
            trace!(time = candle.time, side = %candidate.signal_type, %veto, "Candidate vetoed");
            continue;
        }

        let score = confidence(candidate.signal_type, candles, &ind, i);
        let levels = sizer.levels(candidate.signal_type, candle.close, ind.atr[i]);

        if !cooldown.admit(candle.time) {
            trace!(time = candle.time, side = %candidate.signal_type, "Candidate inside cooldown");
            continue;
        }

        let signal = Signal {
            id: Signal::id_for(candle.time, candidate.signal_type),
            candle_time: candle.time,
            signal_type: candidate.signal_type,
            entry_price: levels.entry,
            stop_loss: levels.stop_loss,
            take_profit: levels.take_profit,
            status: SignalStatus::Active,
            reason: candidate.reason,
            confidence: score,
        };
        debug!(
            time = signal.candle_time,
            side = %signal.signal_type,
            entry = signal.entry_price,
            confidence = signal.confidence,
            reason = %signal.reason,
            "Signal emitted"
        );
        signals.push(signal);
    }
    signals
}
