use async_trait::async_trait;

use common::{Candle, MarketEvent, MarketFeed, Result};

/// Replays a fixed candle list, one closed event per candle.
pub struct ReplayFeed {
    pair: String,
    candles: std::vec::IntoIter<Candle>,
}

impl ReplayFeed {
    pub fn new(pair: impl Into<String>, candles: Vec<Candle>) -> Self {
        Self { pair: pair.into(), candles: candles.into_iter() }
    }

    pub fn remaining(&self) -> usize {
        self.candles.len()
    }
}

#[async_trait]
impl MarketFeed for ReplayFeed {
    async fn next_event(&mut self) -> Result<Option<MarketEvent>> {
        Ok(self.candles.next().map(|candle| MarketEvent {
            pair: self.pair.clone(),
            candle,
            is_candle_closed: true,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_in_order_then_ends() {
        let candles: Vec<Candle> =
            (0..3).map(|i| Candle::new(i * 60_000, 1.0, 2.0, 0.5, 1.5, 10.0)).collect();
        let mut feed = ReplayFeed::new("BTCUSD", candles.clone());
        assert_eq!(feed.remaining(), 3);

        for expected in &candles {
            let event = feed.next_event().await.unwrap().unwrap();
            assert_eq!(event.pair, "BTCUSD");
            assert_eq!(event.candle, *expected);
            assert!(event.is_candle_closed);
        }
        assert!(feed.next_event().await.unwrap().is_none());
    }
}
