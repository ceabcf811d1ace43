use common::Candle;

use super::ema::{ema, ema_from};

/// MACD (Moving Average Convergence/Divergence) series.
///
/// `line = EMA(fast) - EMA(slow)`, `signal = EMA(signal_period)` of the line
/// seeded by the simple average of its first `signal_period` values,
/// `histogram = line - signal`.
#[derive(Debug, Clone, Default)]
pub struct Macd {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

pub fn macd(candles: &[Candle], fast: usize, slow: usize, signal: usize) -> Macd {
    let n = candles.len();
    let mut line = vec![0.0; n];
    let mut histogram = vec![0.0; n];

    let ema_fast = ema(candles, fast);
    let ema_slow = ema(candles, slow);

    let line_start = fast.max(slow).saturating_sub(1);
    if fast == 0 || slow == 0 || line_start >= n {
        return Macd { line, signal: vec![0.0; n], histogram };
    }
    for i in line_start..n {
        line[i] = ema_fast[i] - ema_slow[i];
    }

    let signal_line = ema_from(&line, line_start, signal);
    if signal > 0 {
        for i in (line_start + signal - 1).min(n)..n {
            histogram[i] = line[i] - signal_line[i];
        }
    }

    Macd { line, signal: signal_line, histogram }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_candles};

    #[test]
    fn macd_warmup_is_zero() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let m = macd(&make_candles(&closes), 12, 26, 9);
        assert!(m.line[..25].iter().all(|v| *v == 0.0));
        assert!(m.signal[..33].iter().all(|v| *v == 0.0));
        assert!(m.histogram[..33].iter().all(|v| *v == 0.0));
        assert!(m.line[25] > 0.0);
        assert!(m.signal[33] > 0.0);
    }

    #[test]
    fn histogram_is_line_minus_signal() {
        let closes: Vec<f64> = (0..80).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0).collect();
        let m = macd(&make_candles(&closes), 12, 26, 9);
        for i in 33..80 {
            assert_approx(m.histogram[i], m.line[i] - m.signal[i], 1e-12);
        }
    }

    #[test]
    fn accelerating_uptrend_has_positive_histogram() {
        let closes: Vec<f64> = (0..80).map(|i| 100.0 + (i as f64).powi(2) * 0.05).collect();
        let m = macd(&make_candles(&closes), 12, 26, 9);
        assert!(m.histogram[79] > 0.0);
    }

    #[test]
    fn flat_series_has_zero_macd() {
        let m = macd(&make_candles(&[100.0; 60]), 12, 26, 9);
        assert!(m.histogram.iter().all(|v| v.abs() < 1e-9));
    }

    #[test]
    fn insufficient_data_is_all_zero() {
        let m = macd(&make_candles(&[100.0; 20]), 12, 26, 9);
        assert!(m.line.iter().chain(&m.signal).all(|v| *v == 0.0));
    }
}
