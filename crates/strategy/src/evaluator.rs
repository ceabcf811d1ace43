//! Per-candle strategy decisions.
//!
//! Each strategy is a pure function of the candle index and the precomputed
//! indicator series. The engine picks one with [`evaluator_for`] once per run
//! and calls it for every index past warm-up.

use common::{Candle, SignalType, StrategyKind};

use crate::market::IndicatorSet;
use crate::params::SensitivityParams;

/// A directional idea that still has to pass the filter chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub signal_type: SignalType,
    pub reason: String,
}

impl Candidate {
    pub fn long(reason: impl Into<String>) -> Self {
        Self { signal_type: SignalType::Long, reason: reason.into() }
    }

    pub fn short(reason: impl Into<String>) -> Self {
        Self { signal_type: SignalType::Short, reason: reason.into() }
    }
}

pub type EvaluateFn = fn(&[Candle], &IndicatorSet, &SensitivityParams, usize) -> Option<Candidate>;

pub fn evaluator_for(kind: StrategyKind) -> EvaluateFn {
    match kind {
        StrategyKind::Trend => trend,
        StrategyKind::Reversal => reversal,
        StrategyKind::Momentum => momentum,
    }
}

/// SuperTrend flip first; otherwise an HMA cross in the SuperTrend direction.
pub fn trend(
    candles: &[Candle],
    ind: &IndicatorSet,
    _params: &SensitivityParams,
    i: usize,
) -> Option<Candidate> {
    if i == 0 {
        return None;
    }
    let prev_dir = ind.supertrend.direction[i - 1];
    let dir = ind.supertrend.direction[i];

    if prev_dir == -1 && dir == 1 {
        return Some(Candidate::long("SuperTrend Buy Flip"));
    }
    if prev_dir == 1 && dir == -1 {
        return Some(Candidate::short("SuperTrend Sell Flip"));
    }

    let (prev_close, close) = (candles[i - 1].close, candles[i].close);
    let (prev_hma, hma) = (ind.hma[i - 1], ind.hma[i]);
    if dir == 1 && prev_close <= prev_hma && close > hma {
        return Some(Candidate::long("HMA Trend Entry"));
    }
    if dir == -1 && prev_close >= prev_hma && close < hma {
        return Some(Candidate::short("HMA Trend Entry"));
    }
    None
}

/// Bollinger Band rejection confirmed by RSI extremes and the candle body.
pub fn reversal(
    candles: &[Candle],
    ind: &IndicatorSet,
    params: &SensitivityParams,
    i: usize,
) -> Option<Candidate> {
    if i == 0 {
        return None;
    }
    let prev = &candles[i - 1];
    let candle = &candles[i];
    let rsi = ind.rsi[i];
    let bands = &ind.bands;

    let pierced_lower = prev.low < bands.lower[i - 1];
    if pierced_lower && candle.close > bands.lower[i] && rsi < params.rsi_lower && candle.is_bullish()
    {
        return Some(Candidate::long("BB Rejection + RSI Oversold"));
    }

    let pierced_upper = prev.high > bands.upper[i - 1];
    if pierced_upper && candle.close < bands.upper[i] && rsi > params.rsi_upper && candle.is_bearish()
    {
        return Some(Candidate::short("BB Rejection + RSI Overbought"));
    }
    None
}

/// Donchian breakout of the `momentum_lookback` candles before `i`.
pub fn momentum(
    candles: &[Candle],
    ind: &IndicatorSet,
    params: &SensitivityParams,
    i: usize,
) -> Option<Candidate> {
    if i < params.momentum_lookback {
        return None;
    }
    let close = candles[i].close;
    let lookback = params.momentum_lookback;
    if close > ind.donchian.upper[i] {
        return Some(Candidate::long(format!("Donchian Breakout ({lookback})")));
    }
    if close < ind.donchian.lower[i] {
        return Some(Candidate::short(format!("Donchian Breakdown ({lookback})")));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{BollingerBands, DonchianChannel, SuperTrend};

    fn candle(open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle::new(0, open, high, low, close, 1_000.0)
    }

    fn with_supertrend(direction: Vec<i8>, hma: Vec<f64>) -> IndicatorSet {
        let n = direction.len();
        IndicatorSet {
            supertrend: SuperTrend { line: vec![0.0; n], direction },
            hma,
            ..IndicatorSet::default()
        }
    }

    #[test]
    fn supertrend_flip_beats_hma_cross() {
        let candles = vec![candle(10.0, 11.0, 9.0, 9.5), candle(9.5, 12.0, 9.0, 11.5)];
        // HMA cross is also present, but the flip wins
        let ind = with_supertrend(vec![-1, 1], vec![10.0, 11.0]);
        let p = SensitivityParams::derive(50);
        let c = trend(&candles, &ind, &p, 1).unwrap();
        assert_eq!(c, Candidate::long("SuperTrend Buy Flip"));

        let ind = with_supertrend(vec![1, -1], vec![10.0, 11.0]);
        let c = trend(&candles, &ind, &p, 1).unwrap();
        assert_eq!(c.signal_type, SignalType::Short);
        assert_eq!(c.reason, "SuperTrend Sell Flip");
    }

    #[test]
    fn hma_cross_only_in_supertrend_direction() {
        let candles = vec![candle(10.0, 11.0, 9.0, 9.5), candle(9.5, 12.0, 9.0, 11.5)];
        let p = SensitivityParams::derive(50);

        let long_trend = with_supertrend(vec![1, 1], vec![10.0, 11.0]);
        assert_eq!(trend(&candles, &long_trend, &p, 1), Some(Candidate::long("HMA Trend Entry")));

        // same upward cross while SuperTrend is short: nothing
        let short_trend = with_supertrend(vec![-1, -1], vec![10.0, 11.0]);
        assert_eq!(trend(&candles, &short_trend, &p, 1), None);

        let falling = vec![candle(11.0, 11.5, 10.0, 11.0), candle(11.0, 11.0, 8.0, 8.5)];
        let c = trend(&falling, &short_trend, &p, 1).unwrap();
        assert_eq!(c, Candidate::short("HMA Trend Entry"));
    }

    fn reversal_setup(rsi_now: f64, bullish: bool) -> (Vec<Candle>, IndicatorSet) {
        // previous candle wicks below the lower band at 95, current closes back above it
        let candles = vec![
            candle(97.0, 98.0, 94.0, 96.0),
            if bullish { candle(95.5, 97.5, 95.0, 97.0) } else { candle(97.2, 97.5, 95.0, 96.5) },
        ];
        let ind = IndicatorSet {
            rsi: vec![30.0, rsi_now],
            bands: BollingerBands {
                middle: vec![100.0, 100.0],
                upper: vec![105.0, 105.0],
                lower: vec![95.0, 95.0],
            },
            ..IndicatorSet::default()
        };
        (candles, ind)
    }

    #[test]
    fn reversal_long_requires_every_condition() {
        let p = SensitivityParams::derive(50); // rsi_lower = 32.5
        let (candles, ind) = reversal_setup(25.0, true);
        assert_eq!(
            reversal(&candles, &ind, &p, 1),
            Some(Candidate::long("BB Rejection + RSI Oversold"))
        );

        let (candles, ind) = reversal_setup(40.0, true);
        assert_eq!(reversal(&candles, &ind, &p, 1), None, "RSI not oversold");

        let (candles, ind) = reversal_setup(25.0, false);
        assert_eq!(reversal(&candles, &ind, &p, 1), None, "bearish body");
    }

    #[test]
    fn reversal_short_mirrors_long() {
        let candles = vec![candle(103.0, 106.0, 102.0, 104.0), candle(104.5, 105.0, 102.5, 103.0)];
        let ind = IndicatorSet {
            rsi: vec![70.0, 75.0],
            bands: BollingerBands {
                middle: vec![100.0, 100.0],
                upper: vec![105.0, 105.0],
                lower: vec![95.0, 95.0],
            },
            ..IndicatorSet::default()
        };
        let p = SensitivityParams::derive(50); // rsi_upper = 67.5
        assert_eq!(
            reversal(&candles, &ind, &p, 1),
            Some(Candidate::short("BB Rejection + RSI Overbought"))
        );
    }

    #[test]
    fn higher_sensitivity_widens_rsi_acceptance() {
        // RSI 40 sits between rsi_lower at s=1 (20.25) and at s=100 (45.0)
        let (candles, ind) = reversal_setup(40.0, true);
        assert!(reversal(&candles, &ind, &SensitivityParams::derive(100), 1).is_some());
        assert!(reversal(&candles, &ind, &SensitivityParams::derive(1), 1).is_none());
    }

    #[test]
    fn momentum_breakout_and_breakdown() {
        let p = SensitivityParams::derive(100); // lookback 5
        let n = 6;
        let ind = IndicatorSet {
            donchian: DonchianChannel { upper: vec![110.0; n], lower: vec![90.0; n] },
            ..IndicatorSet::default()
        };
        let mut candles = vec![candle(100.0, 101.0, 99.0, 100.0); n];

        candles[5] = candle(108.0, 112.0, 107.0, 111.0);
        let c = momentum(&candles, &ind, &p, 5).unwrap();
        assert_eq!(c.signal_type, SignalType::Long);
        assert!(c.reason.contains("Breakout"));

        candles[5] = candle(92.0, 92.5, 88.0, 89.0);
        let c = momentum(&candles, &ind, &p, 5).unwrap();
        assert_eq!(c.signal_type, SignalType::Short);

        candles[5] = candle(100.0, 111.0, 89.0, 100.0);
        assert_eq!(momentum(&candles, &ind, &p, 5), None, "wicks alone do not break out");
        assert_eq!(momentum(&candles, &ind, &p, 4), None, "not enough history");
    }

    #[test]
    fn dispatch_selects_the_configured_strategy() {
        let p = SensitivityParams::derive(100);
        let n = 6;
        let ind = IndicatorSet {
            donchian: DonchianChannel { upper: vec![110.0; n], lower: vec![90.0; n] },
            supertrend: SuperTrend { line: vec![0.0; n], direction: vec![1; n] },
            hma: vec![200.0; n],
            rsi: vec![50.0; n],
            bands: BollingerBands {
                middle: vec![100.0; n],
                upper: vec![120.0; n],
                lower: vec![80.0; n],
            },
            ..IndicatorSet::default()
        };
        let mut candles = vec![candle(100.0, 101.0, 99.0, 100.0); n];
        candles[5] = candle(108.0, 112.0, 107.0, 111.0);

        assert!(evaluator_for(StrategyKind::Momentum)(&candles, &ind, &p, 5).is_some());
        assert!(evaluator_for(StrategyKind::Trend)(&candles, &ind, &p, 5).is_none());
        assert!(evaluator_for(StrategyKind::Reversal)(&candles, &ind, &p, 5).is_none());
    }
}
