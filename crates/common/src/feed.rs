use async_trait::async_trait;

use crate::{MarketEvent, Result};

/// Abstraction over a source of candle updates.
///
/// `CandleSimulator` and `ReplayFeed` in `crates/paper` implement this. The
/// signal registry only ever sees `MarketEvent`s, so a live exchange stream
/// can be swapped in without touching the engine.
#[async_trait]
pub trait MarketFeed: Send {
    /// Next candle update, or `None` once the feed is exhausted.
    async fn next_event(&mut self) -> Result<Option<MarketEvent>>;
}
