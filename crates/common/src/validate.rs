use crate::{Candle, Error, Result};

/// Check the caller-side contract the signal engine relies on: finite prices,
/// non-negative volume, `high >= low` and strictly increasing timestamps.
///
/// The engine itself never fails on bad input; callers that load candles from
/// files or feeds run this first.
pub fn validate_candles(candles: &[Candle]) -> Result<()> {
    for (index, c) in candles.iter().enumerate() {
        let prices = [c.open, c.high, c.low, c.close];
        if prices.iter().any(|p| !p.is_finite()) {
            return Err(invalid(index, "non-finite price"));
        }
        if !c.volume.is_finite() || c.volume < 0.0 {
            return Err(invalid(index, format!("volume {} is not a non-negative number", c.volume)));
        }
        if c.high < c.low {
            return Err(invalid(index, format!("high {} below low {}", c.high, c.low)));
        }
        if index > 0 && c.time <= candles[index - 1].time {
            return Err(invalid(
                index,
                format!("time {} does not follow {}", c.time, candles[index - 1].time),
            ));
        }
    }
    Ok(())
}

fn invalid(index: usize, reason: impl Into<String>) -> Error {
    Error::InvalidCandles { index, reason: reason.into() }
}
