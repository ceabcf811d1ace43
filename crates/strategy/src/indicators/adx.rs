//! ADX: Average Directional Index (Wilder).
//!
//! 1. +DM / -DM from consecutive highs and lows; the larger positive move wins,
//!    the other is zeroed.
//! 2. Wilder-smooth TR, +DM and -DM over `period` (first value at `period`).
//! 3. +DI = 100 * +DM / TR, -DI = 100 * -DM / TR.
//! 4. DX = 100 * |+DI - -DI| / (+DI + -DI).
//! 5. ADX = Wilder average of DX, first value at index `2 * period - 1`.

use common::Candle;

use super::atr::{true_range, wilder_average};

/// The first value lands on the `2 * period`-th bar (index `2 * period - 1`):
/// DX starts at index `period` and is seeded with a `period`-bar mean.
/// Shorter inputs are all zero.
pub fn adx(candles: &[Candle], period: usize) -> Vec<f64> {
    let n = candles.len();
    if period == 0 || n < 2 * period {
        return vec![0.0; n];
    }

    let mut plus_dm = vec![0.0; n];
    let mut minus_dm = vec![0.0; n];
    for i in 1..n {
        let up = candles[i].high - candles[i - 1].high;
        let down = candles[i - 1].low - candles[i].low;
        if up > down && up > 0.0 {
            plus_dm[i] = up;
        }
        if down > up && down > 0.0 {
            minus_dm[i] = down;
        }
    }

    let smooth_tr = wilder_average(&true_range(candles), 1, period);
    let smooth_plus = wilder_average(&plus_dm, 1, period);
    let smooth_minus = wilder_average(&minus_dm, 1, period);

    let mut dx = vec![0.0; n];
    for i in period..n {
        if smooth_tr[i] == 0.0 {
            continue;
        }
        let plus_di = 100.0 * smooth_plus[i] / smooth_tr[i];
        let minus_di = 100.0 * smooth_minus[i] / smooth_tr[i];
        let di_sum = plus_di + minus_di;
        if di_sum != 0.0 {
            dx[i] = 100.0 * (plus_di - minus_di).abs() / di_sum;
        }
    }

    wilder_average(&dx, period, period)
}
