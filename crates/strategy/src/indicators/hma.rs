use common::Candle;

use super::closes;

/// Linearly weighted moving average: weight `j + 1` for the j-th oldest of the
/// last `period` values, divided by the triangular number `period * (period + 1) / 2`.
pub fn wma_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![0.0; n];
    if period == 0 || n < period {
        return out;
    }
    let divisor = (period * (period + 1)) as f64 / 2.0;
    for i in period - 1..n {
        let window = &values[i + 1 - period..=i];
        let weighted: f64 = window
            .iter()
            .enumerate()
            .map(|(j, v)| v * (j + 1) as f64)
            .sum();
        out[i] = weighted / divisor;
    }
    out
}

/// Hull moving average of closes: `WMA(√period)` over `2 * WMA(period / 2) - WMA(period)`.
///
/// First valid index is `period - 1 + floor(√period) - 1`.
pub fn hma(candles: &[Candle], period: usize) -> Vec<f64> {
    let n = candles.len();
    if period == 0 {
        return vec![0.0; n];
    }
    let half = (period / 2).max(1);
    let root = ((period as f64).sqrt().floor() as usize).max(1);

    let closes = closes(candles);
    let wma_half = wma_series(&closes, half);
    let wma_full = wma_series(&closes, period);

    let raw: Vec<f64> = (0..n)
        .map(|i| if i + 1 >= period { 2.0 * wma_half[i] - wma_full[i] } else { 0.0 })
        .collect();

    let mut out = wma_series(&raw, root);
    let first_valid = period - 1 + root - 1;
    for v in out.iter_mut().take(first_valid.min(n)) {
        *v = 0.0;
    }
    out
}
