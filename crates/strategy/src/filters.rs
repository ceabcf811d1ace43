use common::{Candle, SignalType};

use crate::config::SignalConfig;
use crate::evaluator::Candidate;
use crate::market::IndicatorSet;

const RSI_LONG_MIN: f64 = 40.0;
const RSI_LONG_MAX: f64 = 70.0;
const RSI_SHORT_MIN: f64 = 30.0;
const RSI_SHORT_MAX: f64 = 60.0;
const VOLUME_SPIKE_RATIO: f64 = 1.2;

/// An optional confirmation gate. Filters can veto a candidate but never
/// change its direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Filter {
    Rsi,
    Volume,
    Macd,
    EmaTrend,
    Adx { threshold: f64 },
}

/// Why a candidate was dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum Veto {
    RsiOutOfBounds { rsi: f64 },
    NoVolumeSpike { volume: f64, average: f64 },
    MacdAgainst { histogram: f64 },
    AgainstLongTrend { close: f64, ema: f64 },
    WeakTrend { adx: f64, threshold: f64 },
}

impl std::fmt::Display for Veto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Veto::RsiOutOfBounds { rsi } => write!(f, "RSI {rsi:.1} outside accepted band"),
            Veto::NoVolumeSpike { volume, average } => {
                write!(f, "volume {volume:.2} below {VOLUME_SPIKE_RATIO}x average {average:.2}")
            }
            Veto::MacdAgainst { histogram } => write!(f, "MACD histogram {histogram:.4} against direction"),
            Veto::AgainstLongTrend { close, ema } => {
                write!(f, "close {close:.4} on the wrong side of EMA200 {ema:.4}")
            }
            Veto::WeakTrend { adx, threshold } => write!(f, "ADX {adx:.1} below {threshold:.1}"),
        }
    }
}

impl Filter {
    fn check(
        &self,
        candidate: &Candidate,
        candles: &[Candle],
        ind: &IndicatorSet,
        i: usize,
    ) -> Result<(), Veto> {
        let long = candidate.signal_type == SignalType::Long;
        let close = candles[i].close;
        match *self {
            Filter::Rsi => {
                let rsi = ind.rsi[i];
                let rejected = if long {
                    rsi < RSI_LONG_MIN || rsi > RSI_LONG_MAX
                } else {
                    rsi > RSI_SHORT_MAX || rsi < RSI_SHORT_MIN
                };
                if rejected {
                    return Err(Veto::RsiOutOfBounds { rsi });
                }
            }
            Filter::Volume => {
                let volume = candles[i].volume;
                let average = ind.volume_avg[i];
                // A zero baseline gives no evidence of a spike.
                if average <= 0.0 || volume <= average * VOLUME_SPIKE_RATIO {
                    return Err(Veto::NoVolumeSpike { volume, average });
                }
            }
            Filter::Macd => {
                let histogram = ind.macd.histogram[i];
                if (long && histogram < 0.0) || (!long && histogram > 0.0) {
                    return Err(Veto::MacdAgainst { histogram });
                }
            }
            Filter::EmaTrend => {
                let ema = ind.ema_long[i];
                if (long && close <= ema) || (!long && close >= ema) {
                    return Err(Veto::AgainstLongTrend { close, ema });
                }
            }
            Filter::Adx { threshold } => {
                let adx = ind.adx[i];
                if adx < threshold {
                    return Err(Veto::WeakTrend { adx, threshold });
                }
            }
        }
        Ok(())
    }
}

/// The enabled filters for one run, in a fixed order.
#[derive(Debug, Clone, Default)]
pub struct FilterChain {
    filters: Vec<Filter>,
}

impl FilterChain {
    pub fn from_config(config: &SignalConfig) -> Self {
        let mut filters = Vec::new();
        if config.use_rsi_filter {
            filters.push(Filter::Rsi);
        }
        if config.use_volume_filter {
            filters.push(Filter::Volume);
        }
        if config.use_macd_filter {
            filters.push(Filter::Macd);
        }
        if config.use_ema_trend_filter {
            filters.push(Filter::EmaTrend);
        }
        if config.use_adx_filter {
            filters.push(Filter::Adx { threshold: config.adx_threshold });
        }
        Self { filters }
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Run every enabled filter; the first veto wins. A passing ADX filter
    /// annotates the candidate's reason with the ADX reading.
    pub fn apply(
        &self,
        candidate: &mut Candidate,
        candles: &[Candle],
        ind: &IndicatorSet,
        i: usize,
    ) -> Result<(), Veto> {
        for filter in &self.filters {
            filter.check(candidate, candles, ind, i)?;
            if let Filter::Adx { .. } = filter {
                candidate.reason.push_str(&format!(" | ADX {:.1}", ind.adx[i]));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::Macd;

    fn single(close: f64, volume: f64) -> Vec<Candle> {
        vec![Candle::new(0, close, close + 1.0, close - 1.0, close, volume)]
    }

    fn indicators(rsi: f64, volume_avg: f64, histogram: f64, ema_long: f64, adx: f64) -> IndicatorSet {
        IndicatorSet {
            rsi: vec![rsi],
            volume_avg: vec![volume_avg],
            macd: Macd { line: vec![0.0], signal: vec![0.0], histogram: vec![histogram] },
            ema_long: vec![ema_long],
            adx: vec![adx],
            ..IndicatorSet::default()
        }
    }

    fn chain(f: impl FnOnce(&mut SignalConfig)) -> FilterChain {
        let mut cfg = SignalConfig::default();
        f(&mut cfg);
        FilterChain::from_config(&cfg)
    }

    #[test]
    fn empty_chain_passes_everything() {
        let chain = FilterChain::from_config(&SignalConfig::default());
        assert!(chain.filters().is_empty());
        let mut c = Candidate::long("x");
        assert!(chain.apply(&mut c, &single(100.0, 0.0), &indicators(0.0, 0.0, -1.0, 500.0, 0.0), 0).is_ok());
        assert_eq!(c.reason, "x");
    }

    #[test]
    fn rsi_filter_bounds_are_direction_specific() {
        let chain = chain(|c| c.use_rsi_filter = true);
        let candles = single(100.0, 10.0);

        for (rsi, long_ok, short_ok) in
            [(35.0, false, true), (50.0, true, true), (65.0, true, false), (75.0, false, false), (25.0, false, false)]
        {
            let ind = indicators(rsi, 0.0, 0.0, 0.0, 0.0);
            assert_eq!(chain.apply(&mut Candidate::long("l"), &candles, &ind, 0).is_ok(), long_ok, "long at {rsi}");
            assert_eq!(chain.apply(&mut Candidate::short("s"), &candles, &ind, 0).is_ok(), short_ok, "short at {rsi}");
        }
    }

    #[test]
    fn volume_filter_needs_a_spike() {
        let chain = chain(|c| c.use_volume_filter = true);
        let ind = indicators(50.0, 100.0, 0.0, 0.0, 0.0);
        assert!(chain.apply(&mut Candidate::long("l"), &single(100.0, 121.0), &ind, 0).is_ok());
        assert_eq!(
            chain.apply(&mut Candidate::long("l"), &single(100.0, 120.0), &ind, 0),
            Err(Veto::NoVolumeSpike { volume: 120.0, average: 100.0 })
        );
        let zero_baseline = indicators(50.0, 0.0, 0.0, 0.0, 0.0);
        assert!(chain.apply(&mut Candidate::long("l"), &single(100.0, 5.0), &zero_baseline, 0).is_err());
    }

    #[test]
    fn macd_filter_vetoes_opposing_histogram() {
        let chain = chain(|c| c.use_macd_filter = true);
        let candles = single(100.0, 10.0);
        let bearish = indicators(50.0, 0.0, -0.5, 0.0, 0.0);
        assert!(chain.apply(&mut Candidate::long("l"), &candles, &bearish, 0).is_err());
        assert!(chain.apply(&mut Candidate::short("s"), &candles, &bearish, 0).is_ok());
    }

    #[test]
    fn ema_trend_filter_uses_ema200() {
        let chain = chain(|c| c.use_ema_trend_filter = true);
        let below = indicators(50.0, 0.0, 0.0, 110.0, 0.0);
        let candles = single(100.0, 10.0);
        assert!(matches!(
            chain.apply(&mut Candidate::long("l"), &candles, &below, 0),
            Err(Veto::AgainstLongTrend { .. })
        ));
        assert!(chain.apply(&mut Candidate::short("s"), &candles, &below, 0).is_ok());
    }

    #[test]
    fn adx_filter_gates_and_annotates() {
        let chain = chain(|c| {
            c.use_adx_filter = true;
            c.adx_threshold = 25.0;
        });
        let candles = single(100.0, 10.0);

        let mut weak = Candidate::long("Donchian Breakout (18)");
        let ind = indicators(50.0, 0.0, 0.0, 0.0, 18.0);
        assert!(matches!(chain.apply(&mut weak, &candles, &ind, 0), Err(Veto::WeakTrend { .. })));

        let mut strong = Candidate::short("Donchian Breakdown (18)");
        let ind = indicators(50.0, 0.0, 0.0, 0.0, 31.25);
        assert!(chain.apply(&mut strong, &candles, &ind, 0).is_ok());
        assert_eq!(strong.reason, "Donchian Breakdown (18) | ADX 31.2");
        assert_eq!(strong.signal_type, SignalType::Short);
    }

    #[test]
    fn first_veto_short_circuits() {
        let chain = chain(|c| {
            c.use_rsi_filter = true;
            c.use_adx_filter = true;
        });
        let ind = indicators(10.0, 0.0, 0.0, 0.0, 50.0);
        let mut c = Candidate::long("x");
        assert!(matches!(
            chain.apply(&mut c, &single(100.0, 10.0), &ind, 0),
            Err(Veto::RsiOutOfBounds { .. })
        ));
        assert_eq!(c.reason, "x");
    }
}
