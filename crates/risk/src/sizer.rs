use common::SignalType;

/// Stop distance as a multiple of ATR. Compiled-in policy, not configurable.
pub const VOLATILITY_BUFFER_ATR_MULTIPLE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceLevels {
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
}

/// Prices a signal from the entry close and the current ATR.
#[derive(Debug, Clone, Copy)]
pub struct RiskSizer {
    risk_reward: f64,
}

impl RiskSizer {
    pub fn new(risk_reward: f64) -> Self {
        Self { risk_reward }
    }

    /// Entry is the close. With a zero ATR all three levels collapse onto the
    /// entry; callers still get a well-formed result.
    pub fn levels(&self, side: SignalType, close: f64, atr: f64) -> PriceLevels {
        let buffer = atr * VOLATILITY_BUFFER_ATR_MULTIPLE;
        let reward = buffer * self.risk_reward;
        match side {
            SignalType::Long => PriceLevels {
                entry: close,
                stop_loss: close - buffer,
                take_profit: close + reward,
            },
            SignalType::Short => PriceLevels {
                entry: close,
                stop_loss: close + buffer,
                take_profit: close - reward,
            },
        }
    }
}
