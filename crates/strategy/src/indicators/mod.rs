//! Indicator library.
//!
//! Every function takes the full candle slice (or a derived value series) and
//! returns a series of the same length, aligned by index. Entries before an
//! indicator's warm-up are `0.0` and must not be read.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod channel;
pub mod ema;
pub mod hma;
pub mod macd;
pub mod rsi;
pub mod supertrend;

pub use adx::adx;
pub use atr::{atr, true_range};
pub use bollinger::{bollinger, stddev, BollingerBands};
pub use channel::{donchian, volume_average, DonchianChannel};
pub use ema::{ema, ema_series, sma};
pub use hma::{hma, wma_series};
pub use macd::{macd, Macd};
pub use rsi::rsi;
pub use supertrend::{supertrend, SuperTrend};

use common::Candle;

pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

/// Synthetic candles from closes: open = previous close, range padded by 1.0.
#[cfg(test)]
pub(crate) fn make_candles(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Candle::new(
                i as i64 * 60_000,
                open,
                open.max(close) + 1.0,
                open.min(close) - 1.0,
                close,
                1_000.0,
            )
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}",
        (actual - expected).abs()
    );
}
