use common::Candle;

/// Donchian channel over the `lookback` candles *preceding* each index; the
/// current candle is excluded so a close can break out of it.
#[derive(Debug, Clone, Default)]
pub struct DonchianChannel {
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

pub fn donchian(candles: &[Candle], lookback: usize) -> DonchianChannel {
    let n = candles.len();
    let mut upper = vec![0.0; n];
    let mut lower = vec![0.0; n];
    if lookback == 0 {
        return DonchianChannel { upper, lower };
    }
    for i in lookback..n {
        let window = &candles[i - lookback..i];
        upper[i] = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
        lower[i] = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
    }
    DonchianChannel { upper, lower }
}

/// Mean volume of the `lookback` candles preceding each index.
pub fn volume_average(candles: &[Candle], lookback: usize) -> Vec<f64> {
    let n = candles.len();
    let mut out = vec![0.0; n];
    if lookback == 0 {
        return out;
    }
    for i in lookback..n {
        out[i] = candles[i - lookback..i].iter().map(|c| c.volume).sum::<f64>() / lookback as f64;
    }
    out
}
