/// Thresholds derived from the single `sensitivity` knob (1–100).
///
/// Higher sensitivity means shorter cooldowns, shorter breakout windows, a
/// wider RSI acceptance band and a faster, tighter SuperTrend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensitivityParams {
    pub cooldown_candles: i64,
    pub momentum_lookback: usize,
    pub rsi_lower: f64,
    pub rsi_upper: f64,
    pub supertrend_factor: f64,
    pub supertrend_period: usize,
}

impl SensitivityParams {
    /// Values outside 1..=100 are clamped first.
    pub fn derive(sensitivity: u8) -> Self {
        let s = f64::from(sensitivity.clamp(1, 100));
        Self {
            cooldown_candles: ((20.0 - s * 0.18).round() as i64).max(2),
            momentum_lookback: ((30.0 - s * 0.25).round() as usize).max(5),
            rsi_lower: 20.0 + s * 0.25,
            rsi_upper: 80.0 - s * 0.25,
            supertrend_factor: 4.0 - s * 0.025,
            supertrend_period: ((14.0 - s * 0.07).round() as usize).max(7),
        }
    }
}
