//! Property tests for `compute_signals` over random candle walks.

use common::{Candle, SignalType, StrategyKind};
use proptest::prelude::*;
use strategy::{compute_signals, SensitivityParams, SignalConfig, WARMUP_CANDLES};

const INTERVAL_MS: i64 = 60_000;

// ── Strategies (proptest) ────────────────────────────────────────────

/// Random walk with positive range on every candle, so ATR is never zero.
fn arb_candles() -> impl Strategy<Value = Vec<Candle>> {
    proptest::collection::vec((-2.0..2.0_f64, 0.05..2.0_f64, 100.0..5_000.0_f64), 200..360).prop_map(
        |steps| {
            let mut price = 500.0;
            steps
                .into_iter()
                .enumerate()
                .map(|(i, (step, pad, volume))| {
                    let open = price;
                    price = (price + step).max(1.0);
                    Candle::new(
                        i as i64 * INTERVAL_MS,
                        open,
                        open.max(price) + pad,
                        open.min(price) - pad * 0.5,
                        price,
                        volume,
                    )
                })
                .collect()
        },
    )
}

fn arb_config() -> impl Strategy<Value = SignalConfig> {
    (
        prop_oneof![
            Just(StrategyKind::Trend),
            Just(StrategyKind::Reversal),
            Just(StrategyKind::Momentum)
        ],
        1..=100u8,
        0.5..5.0_f64,
        proptest::collection::vec(any::<bool>(), 5),
    )
        .prop_map(|(strategy, sensitivity, risk_reward, flags)| SignalConfig {
            strategy,
            sensitivity,
            risk_reward,
            use_rsi_filter: flags[0],
            use_volume_filter: flags[1],
            use_macd_filter: flags[2],
            use_ema_trend_filter: flags[3],
            use_adx_filter: flags[4],
            ..SignalConfig::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Signals come out oldest first, never before warm-up, and spaced by at
    /// least the cooldown.
    #[test]
    fn ordered_spaced_and_warmed_up(candles in arb_candles(), cfg in arb_config()) {
        let signals = compute_signals(&candles, &cfg);
        let gap = SensitivityParams::derive(cfg.sensitivity).cooldown_candles * INTERVAL_MS;

        if candles.len() < WARMUP_CANDLES {
            prop_assert!(signals.is_empty());
        }
        for s in &signals {
            prop_assert!(s.candle_time >= WARMUP_CANDLES as i64 * INTERVAL_MS);
        }
        for w in signals.windows(2) {
            prop_assert!(w[1].candle_time > w[0].candle_time);
            prop_assert!(w[1].candle_time - w[0].candle_time >= gap);
        }
    }

    /// Confidence is clamped and prices sit on the correct sides of entry.
    #[test]
    fn scored_and_priced(candles in arb_candles(), cfg in arb_config()) {
        for s in compute_signals(&candles, &cfg) {
            prop_assert!((30..=98).contains(&s.confidence));
            prop_assert!(!s.reason.is_empty());

            let candle = candles.iter().find(|c| c.time == s.candle_time).unwrap();
            prop_assert_eq!(s.entry_price, candle.close);
            match s.signal_type {
                SignalType::Long => {
                    prop_assert!(s.stop_loss < s.entry_price && s.entry_price < s.take_profit);
                }
                SignalType::Short => {
                    prop_assert!(s.take_profit < s.entry_price && s.entry_price < s.stop_loss);
                }
            }
        }
    }

    /// Same input, same output, ids included.
    #[test]
    fn idempotent(candles in arb_candles(), cfg in arb_config()) {
        prop_assert_eq!(compute_signals(&candles, &cfg), compute_signals(&candles, &cfg));
    }

    /// Appending candles never rewrites signals already emitted on a prefix.
    #[test]
    fn prefix_signals_are_stable(candles in arb_candles(), cfg in arb_config(), cut in 0.0..1.0_f64) {
        let len = WARMUP_CANDLES + ((candles.len() - WARMUP_CANDLES) as f64 * cut) as usize;
        let prefix = &candles[..len];
        let last_time = prefix.last().map(|c| c.time).unwrap_or(i64::MIN);

        let on_prefix = compute_signals(prefix, &cfg);
        let on_full: Vec<_> = compute_signals(&candles, &cfg)
            .into_iter()
            .filter(|s| s.candle_time <= last_time)
            .collect();
        prop_assert_eq!(on_prefix, on_full);
    }
}
