use common::Candle;

use crate::config::SignalConfig;
use crate::indicators::{self, BollingerBands, DonchianChannel, Macd, SuperTrend};
use crate::params::SensitivityParams;

pub const RSI_PERIOD: usize = 14;
pub const ADX_PERIOD: usize = 14;
pub const HMA_PERIOD: usize = 9;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_WIDTH: f64 = 2.0;
pub const VOLUME_LOOKBACK: usize = 10;
pub const EMA_FAST: usize = 21;
pub const EMA_MEDIUM: usize = 50;
pub const EMA_LONG: usize = 200;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;

/// Every indicator series the strategies, filters and scorer read, computed
/// from scratch over the full candle slice for one engine run.
#[derive(Debug, Clone, Default)]
pub struct IndicatorSet {
    pub ema_fast: Vec<f64>,
    pub ema_medium: Vec<f64>,
    pub ema_long: Vec<f64>,
    pub rsi: Vec<f64>,
    /// ATR over the configured `atr_period`; drives the stop buffer.
    pub atr: Vec<f64>,
    pub adx: Vec<f64>,
    pub macd: Macd,
    pub bands: BollingerBands,
    pub hma: Vec<f64>,
    pub supertrend: SuperTrend,
    pub donchian: DonchianChannel,
    pub volume_avg: Vec<f64>,
}

impl IndicatorSet {
    pub fn compute(candles: &[Candle], config: &SignalConfig, params: &SensitivityParams) -> Self {
        Self {
            ema_fast: indicators::ema(candles, EMA_FAST),
            ema_medium: indicators::ema(candles, EMA_MEDIUM),
            ema_long: indicators::ema(candles, EMA_LONG),
            rsi: indicators::rsi(candles, RSI_PERIOD),
            atr: indicators::atr(candles, config.atr_period),
            adx: indicators::adx(candles, ADX_PERIOD),
            macd: indicators::macd(candles, MACD_FAST, MACD_SLOW, MACD_SIGNAL),
            bands: indicators::bollinger(candles, BOLLINGER_PERIOD, BOLLINGER_WIDTH),
            hma: indicators::hma(candles, HMA_PERIOD),
            supertrend: indicators::supertrend(
                candles,
                params.supertrend_period,
                params.supertrend_factor,
            ),
            donchian: indicators::donchian(candles, params.momentum_lookback),
            volume_avg: indicators::volume_average(candles, VOLUME_LOOKBACK),
        }
    }
}
