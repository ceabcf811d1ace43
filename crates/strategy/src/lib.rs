//! Candle-driven signal engine: indicators, the three strategies, the filter
//! chain, confidence scoring and the live per-pair registry.

pub mod config;
pub mod cooldown;
pub mod engine;
pub mod evaluator;
pub mod filters;
pub mod indicators;
pub mod market;
pub mod params;
pub mod registry;
pub mod scoring;

pub use config::SignalConfig;
pub use engine::{compute_signals, WARMUP_CANDLES};
pub use evaluator::Candidate;
pub use filters::{Filter, FilterChain, Veto};
pub use market::IndicatorSet;
pub use params::SensitivityParams;
pub use registry::SignalRegistry;
