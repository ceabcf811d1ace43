//! Offline market data: a seeded candle simulator and a replay feed, both
//! usable wherever a live `MarketFeed` is expected.

pub mod replay;
pub mod simulator;

pub use replay::ReplayFeed;
pub use simulator::CandleSimulator;
