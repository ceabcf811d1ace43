//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|).
//! ATR uses Wilder smoothing (alpha = 1/period) seeded with the mean of the
//! first `period` true ranges that have a previous close, so the first value
//! lands at index `period`.

use common::Candle;

/// True Range series. `TR[0] = high[0] - low[0]` (no previous close).
pub fn true_range(candles: &[Candle]) -> Vec<f64> {
    let mut tr = Vec::with_capacity(candles.len());
    for (i, c) in candles.iter().enumerate() {
        if i == 0 {
            tr.push(c.high - c.low);
            continue;
        }
        let pc = candles[i - 1].close;
        tr.push((c.high - c.low).max((c.high - pc).abs()).max((c.low - pc).abs()));
    }
    tr
}

pub fn atr(candles: &[Candle], period: usize) -> Vec<f64> {
    wilder_average(&true_range(candles), 1, period)
}

/// Wilder-smoothed average of `values[first..]`.
///
/// Seed: mean of `values[first..first + period]`, stored at
/// `first + period - 1`; then `avg = (prev * (period - 1) + x) / period`.
pub(crate) fn wilder_average(values: &[f64], first: usize, period: usize) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![0.0; n];
    if period == 0 || first + period > n {
        return out;
    }

    let seed_idx = first + period - 1;
    let p = period as f64;
    out[seed_idx] = values[first..=seed_idx].iter().sum::<f64>() / p;
    for i in seed_idx + 1..n {
        out[i] = (out[i - 1] * (p - 1.0) + values[i]) / p;
    }
    out
}
