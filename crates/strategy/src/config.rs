use std::path::Path;

use serde::{Deserialize, Serialize};

use common::{Error, Result, StrategyKind};

/// Signal engine configuration. Immutable for the duration of one
/// `compute_signals` call.
///
/// Example `config/signals.toml`:
/// ```toml
/// strategy = "MOMENTUM"
/// sensitivity = 60
/// riskReward = 2.5
/// useVolumeFilter = true
/// useAdxFilter = true
/// adxThreshold = 22.0
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignalConfig {
    pub strategy: StrategyKind,
    /// Single 1–100 tuning knob; see `SensitivityParams`.
    pub sensitivity: u8,
    /// Take-profit distance as a multiple of the stop distance.
    pub risk_reward: f64,
    pub atr_period: usize,
    #[serde(rename = "useRSIFilter", alias = "useRsiFilter")]
    pub use_rsi_filter: bool,
    pub use_volume_filter: bool,
    pub use_macd_filter: bool,
    pub use_ema_trend_filter: bool,
    pub use_adx_filter: bool,
    pub adx_threshold: f64,
    // Display-only; carried for downstream renderers.
    #[serde(rename = "showTP", alias = "showTp")]
    pub show_tp: bool,
    #[serde(rename = "showSL", alias = "showSl")]
    pub show_sl: bool,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Trend,
            sensitivity: 50,
            risk_reward: 2.0,
            atr_period: 14,
            use_rsi_filter: false,
            use_volume_filter: false,
            use_macd_filter: false,
            use_ema_trend_filter: false,
            use_adx_filter: false,
            adx_threshold: 25.0,
            show_tp: true,
            show_sl: true,
        }
    }
}

impl SignalConfig {
    /// Load from a TOML file, or JSON when the path ends in `.json`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: SignalConfig = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("failed to parse signal config at '{}': {e}", path.display()))
            })?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.sensitivity) {
            return Err(Error::Config(format!(
                "sensitivity must be within 1..=100, got {}",
                self.sensitivity
            )));
        }
        if !(self.risk_reward.is_finite() && self.risk_reward > 0.0) {
            return Err(Error::Config(format!(
                "riskReward must be a positive number, got {}",
                self.risk_reward
            )));
        }
        if self.atr_period == 0 {
            return Err(Error::Config("atrPeriod must be at least 1".into()));
        }
        if !(self.adx_threshold.is_finite() && self.adx_threshold >= 0.0) {
            return Err(Error::Config(format!(
                "adxThreshold must be non-negative, got {}",
                self.adx_threshold
            )));
        }
        Ok(())
    }
}
