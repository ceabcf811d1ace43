use crate::{Error, Result};

/// Runtime settings for the `signalbot` binary, loaded from environment
/// variables at startup. Everything has a default; a value that is present
/// but malformed is a configuration error.
#[derive(Debug, Clone)]
pub struct Config {
    // Signal engine config file (TOML or JSON). `None` = built-in defaults.
    pub signal_config_path: Option<String>,

    // Candle source: a JSON array of candles, or the simulator when unset.
    pub candles_path: Option<String>,
    pub pair: String,

    // Simulator
    pub sim_candles: usize,
    pub sim_seed: u64,
    pub sim_interval_ms: i64,
    pub sim_start_price: f64,

    // Stream candles through the live registry instead of one batch run.
    pub live: bool,
}

impl Config {
    /// Load configuration from environment variables.
    /// Loads `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        Ok(Config {
            signal_config_path: optional_env("SIGNAL_CONFIG_PATH"),
            candles_path: optional_env("CANDLES_PATH"),
            pair: optional_env("PAIR").unwrap_or_else(|| "SIMUSD".to_string()),
            sim_candles: parsed_env("SIM_CANDLES", 500)?,
            sim_seed: parsed_env("SIM_SEED", 42)?,
            sim_interval_ms: parsed_env("SIM_INTERVAL_MS", 60_000)?,
            sim_start_price: parsed_env("SIM_START_PRICE", 100.0)?,
            live: optional_env("LIVE").map(|v| parse_flag("LIVE", &v)).transpose()?.unwrap_or(false),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("{key}='{raw}' is invalid: {e}"))),
        None => Ok(default),
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!("{key} must be a boolean flag, got: '{other}'"))),
    }
}
