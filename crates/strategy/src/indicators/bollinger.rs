use common::Candle;

use super::sma;

/// Bollinger Bands: SMA centre line ± `width` population standard deviations.
#[derive(Debug, Clone, Default)]
pub struct BollingerBands {
    pub middle: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Population standard deviation of the last `period` closes ending at `index`,
/// measured around `mean`. Returns 0.0 when there is not enough history.
pub fn stddev(candles: &[Candle], period: usize, index: usize, mean: f64) -> f64 {
    if period == 0 || index + 1 < period || index >= candles.len() {
        return 0.0;
    }
    let window = &candles[index + 1 - period..=index];
    let variance = window.iter().map(|c| (c.close - mean).powi(2)).sum::<f64>() / period as f64;
    variance.sqrt()
}

pub fn bollinger(candles: &[Candle], period: usize, width: f64) -> BollingerBands {
    let n = candles.len();
    let middle = sma(candles, period);
    let mut upper = vec![0.0; n];
    let mut lower = vec![0.0; n];

    if period > 0 && n >= period {
        for i in period - 1..n {
            let sd = stddev(candles, period, i, middle[i]);
            upper[i] = middle[i] + width * sd;
            lower[i] = middle[i] - width * sd;
        }
    }

    BollingerBands { middle, upper, lower }
}
