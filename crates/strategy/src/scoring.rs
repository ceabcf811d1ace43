use common::{Candle, SignalType};

use crate::market::IndicatorSet;

pub const BASE_CONFIDENCE: i32 = 60;
pub const MIN_CONFIDENCE: i32 = 30;
pub const MAX_CONFIDENCE: i32 = 98;

const RSI_BONUS: i32 = 15;
const RSI_PENALTY: i32 = -10;
const STRONG_VOLUME_RATIO: f64 = 1.5;
const STRONG_VOLUME_BONUS: i32 = 15;
const ABOVE_AVERAGE_VOLUME_BONUS: i32 = 5;
const TREND_ALIGNMENT_BONUS: i32 = 10;
const STRONG_ADX: f64 = 30.0;
const STRONG_ADX_BONUS: i32 = 10;

/// Additive confidence score for a candidate at index `i`, clamped to
/// `MIN_CONFIDENCE..=MAX_CONFIDENCE`.
pub fn confidence(signal_type: SignalType, candles: &[Candle], ind: &IndicatorSet, i: usize) -> u8 {
    let candle = &candles[i];
    let rsi = ind.rsi[i];
    let mut score = BASE_CONFIDENCE;

    score += match signal_type {
        SignalType::Long if rsi < 35.0 => RSI_BONUS,
        SignalType::Long if rsi > 60.0 => RSI_PENALTY,
        SignalType::Short if rsi > 65.0 => RSI_BONUS,
        SignalType::Short if rsi < 40.0 => RSI_PENALTY,
        _ => 0,
    };

    let average = ind.volume_avg[i];
    if average > 0.0 {
        if candle.volume > average * STRONG_VOLUME_RATIO {
            score += STRONG_VOLUME_BONUS;
        } else if candle.volume > average {
            score += ABOVE_AVERAGE_VOLUME_BONUS;
        }
    }

    let (fast, medium) = (ind.ema_fast[i], ind.ema_medium[i]);
    let aligned = match signal_type {
        SignalType::Long => candle.close > fast && fast > medium,
        SignalType::Short => candle.close < fast && fast < medium,
    };
    if aligned {
        score += TREND_ALIGNMENT_BONUS;
    }

    if ind.adx[i] > STRONG_ADX {
        score += STRONG_ADX_BONUS;
    }

    score.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE) as u8
}
