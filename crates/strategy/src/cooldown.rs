use common::Candle;

/// Nominal candle spacing in milliseconds, taken from the first two candles.
pub fn candle_duration(candles: &[Candle]) -> i64 {
    match candles {
        [first, second, ..] => second.time - first.time,
        _ => 0,
    }
}

/// Minimum temporal spacing between consecutive emitted signals.
#[derive(Debug, Clone, Copy)]
pub struct Cooldown {
    min_gap_ms: i64,
    last_emitted: Option<i64>,
}

impl Cooldown {
    pub fn new(cooldown_candles: i64, candle_duration: i64) -> Self {
        Self { min_gap_ms: cooldown_candles.saturating_mul(candle_duration), last_emitted: None }
    }

    /// Continue a clock whose last emission happened at `last_emitted`.
    pub fn resume_after(mut self, last_emitted: Option<i64>) -> Self {
        self.last_emitted = last_emitted;
        self
    }

    pub fn min_gap_ms(&self) -> i64 {
        self.min_gap_ms
    }

    /// Returns true and records `time` when a signal at `time` may be emitted.
    pub fn admit(&mut self, time: i64) -> bool {
        let open = match self.last_emitted {
            None => true,
            Some(last) => time - last >= self.min_gap_ms,
        };
        if open {
            self.last_emitted = Some(time);
        }
        open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_from_first_two_candles() {
        let candles: Vec<Candle> = [0, 60_000, 180_000]
            .iter()
            .map(|&t| Candle::new(t, 1.0, 1.0, 1.0, 1.0, 0.0))
            .collect();
        assert_eq!(candle_duration(&candles), 60_000);
        assert_eq!(candle_duration(&candles[..1]), 0);
    }

    #[test]
    fn first_signal_always_passes_then_gap_enforced() {
        let mut cd = Cooldown::new(3, 60_000);
        assert_eq!(cd.min_gap_ms(), 180_000);
        assert!(cd.admit(1_000_000));
        assert!(!cd.admit(1_060_000));
        assert!(!cd.admit(1_120_000));
        // rejected candidates do not reset the clock
        assert!(cd.admit(1_180_000));
        assert!(!cd.admit(1_200_000));
    }

    #[test]
    fn resumed_clock_counts_from_previous_emission() {
        let mut cd = Cooldown::new(3, 60_000).resume_after(Some(1_000_000));
        assert!(!cd.admit(1_120_000));
        assert!(cd.admit(1_180_000));
        assert!(Cooldown::new(3, 60_000).resume_after(None).admit(0));
    }
}
