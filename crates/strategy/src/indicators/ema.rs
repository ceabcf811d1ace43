use common::Candle;

use super::closes;

/// Exponential Moving Average of candle closes.
///
/// Seeded at index `period - 1` with the SMA of the first `period` closes, then
/// `ema[i] = close[i] * k + ema[i - 1] * (1 - k)` with `k = 2 / (period + 1)`.
pub fn ema(candles: &[Candle], period: usize) -> Vec<f64> {
    ema_series(&closes(candles), period)
}

/// EMA over an arbitrary value series, same seeding rule as [`ema`].
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    ema_from(values, 0, period)
}

/// EMA over `values[start..]`. Used when the input series itself has a warm-up
/// prefix (e.g. the MACD line) that must not leak into the seed.
pub(crate) fn ema_from(values: &[f64], start: usize, period: usize) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![0.0; n];
    if period == 0 || start + period > n {
        return out;
    }

    let seed_idx = start + period - 1;
    out[seed_idx] = values[start..=seed_idx].iter().sum::<f64>() / period as f64;

    let k = 2.0 / (period as f64 + 1.0);
    for i in seed_idx + 1..n {
        out[i] = values[i] * k + out[i - 1] * (1.0 - k);
    }
    out
}

/// Simple Moving Average of candle closes over the trailing `period` candles.
pub fn sma(candles: &[Candle], period: usize) -> Vec<f64> {
    let n = candles.len();
    let mut out = vec![0.0; n];
    if period == 0 || n < period {
        return out;
    }
    for i in period - 1..n {
        let window = &candles[i + 1 - period..=i];
        out[i] = window.iter().map(|c| c.close).sum::<f64>() / period as f64;
    }
    out
}
