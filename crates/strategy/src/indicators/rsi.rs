use common::Candle;

/// RSI (Relative Strength Index) of candle closes.
///
/// Uses Wilder's smoothed moving average (same as TradingView / standard RSI).
/// The first value lands at index `period`, seeded with the simple mean of the
/// first `period` close-to-close gains and losses. When the average loss is
/// zero the RSI is pinned to 100.
pub fn rsi(candles: &[Candle], period: usize) -> Vec<f64> {
    let n = candles.len();
    let mut out = vec![0.0; n];
    if period == 0 || n <= period {
        return out;
    }

    let p = period as f64;
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let change = candles[i].close - candles[i - 1].close;
        if change > 0.0 {
            avg_gain += change;
        } else {
            avg_loss -= change;
        }
    }
    avg_gain /= p;
    avg_loss /= p;
    out[period] = rsi_value(avg_gain, avg_loss);

    // Wilder smoothing over remaining changes
    for i in period + 1..n {
        let change = candles[i].close - candles[i - 1].close;
        let gain = if change > 0.0 { change } else { 0.0 };
        let loss = if change < 0.0 { -change } else { 0.0 };
        avg_gain = (avg_gain * (p - 1.0) + gain) / p;
        avg_loss = (avg_loss * (p - 1.0) + loss) / p;
        out[i] = rsi_value(avg_gain, avg_loss);
    }
    out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}
