pub mod outcome;
pub mod sizer;

pub use outcome::{resolve_outcome, summarize, OutcomeSummary};
pub use sizer::{PriceLevels, RiskSizer, VOLATILITY_BUFFER_ATR_MULTIPLE};
