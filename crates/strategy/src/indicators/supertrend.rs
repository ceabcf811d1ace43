//! SuperTrend: ATR-based directional indicator.
//!
//! Inherently sequential: bands are sticky and only ratchet toward price
//! unless the previous close has already crossed them. Direction flips from
//! short to long when the close crosses above the prior upper band, and from
//! long to short when it crosses below the prior lower band.
//!
//! The plotted line is the lower band while long and the upper band while short.

use common::Candle;

use super::atr;

#[derive(Debug, Clone, Default)]
pub struct SuperTrend {
    pub line: Vec<f64>,
    /// +1 long, -1 short, 0 before warm-up.
    pub direction: Vec<i8>,
}

pub fn supertrend(candles: &[Candle], period: usize, factor: f64) -> SuperTrend {
    let n = candles.len();
    let mut line = vec![0.0; n];
    let mut direction = vec![0i8; n];

    // First valid ATR value sits at index `period`.
    let start = period;
    if period == 0 || start >= n {
        return SuperTrend { line, direction };
    }

    let atr = atr(candles, period);

    let mut upper = candles[start].mid() + factor * atr[start];
    let mut lower = candles[start].mid() - factor * atr[start];
    let mut dir: i8 = 1;
    line[start] = lower;
    direction[start] = dir;

    for i in start + 1..n {
        let mid = candles[i].mid();
        let basic_upper = mid + factor * atr[i];
        let basic_lower = mid - factor * atr[i];
        let prev_close = candles[i - 1].close;
        let close = candles[i].close;

        // Upper band only tightens (moves down) while price stays below it.
        let final_upper = if basic_upper < upper || prev_close > upper {
            basic_upper
        } else {
            upper
        };
        // Lower band only tightens (moves up) while price stays above it.
        let final_lower = if basic_lower > lower || prev_close < lower {
            basic_lower
        } else {
            lower
        };

        if dir == -1 && close > upper {
            dir = 1;
        } else if dir == 1 && close < lower {
            dir = -1;
        }

        upper = final_upper;
        lower = final_lower;
        line[i] = if dir == 1 { lower } else { upper };
        direction[i] = dir;
    }

    SuperTrend { line, direction }
}
