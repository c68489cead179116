//! Bullish pattern matchers, most specific first. Only consulted once every
//! rejection gate has passed.

use crate::common::math::known;
use crate::models::classification::ScanType;
use crate::models::indicators::IndicatorSnapshot;

pub const A_PLUS_HIGH_RATIO: f64 = 0.995;
pub const BREAKOUT_HIGH_RATIO: f64 = 0.93;
pub const MOMENTUM_MIN_RSI: f64 = 55.0;
pub const PULLBACK_BAND_LOW: f64 = -0.05;
pub const PULLBACK_BAND_HIGH: f64 = 0.03;

/// Returns the setup message when the pattern matches.
pub type PatternCheck = fn(&IndicatorSnapshot, f64) -> Option<String>;

#[derive(Clone, Copy)]
pub struct PatternMatcher {
    pub scan_type: ScanType,
    pub check: PatternCheck,
}

pub const PATTERN_MATCHERS: [PatternMatcher; 5] = [
    PatternMatcher {
        scan_type: ScanType::APlusMomentum,
        check: a_plus_momentum,
    },
    PatternMatcher {
        scan_type: ScanType::Breakout,
        check: breakout,
    },
    PatternMatcher {
        scan_type: ScanType::Momentum,
        check: momentum,
    },
    PatternMatcher {
        scan_type: ScanType::Pullback,
        check: pullback,
    },
    PatternMatcher {
        scan_type: ScanType::ConsolidationBreakout,
        check: consolidation_breakout,
    },
];

pub fn a_plus_momentum(snapshot: &IndicatorSnapshot, price: f64) -> Option<String> {
    let high = known(snapshot.high_52w)?;
    (price >= high * A_PLUS_HIGH_RATIO).then(|| {
        format!("Trading at {:.2}, within 0.5% of the 52-week high ({:.2})", price, high)
    })
}

pub fn breakout(snapshot: &IndicatorSnapshot, price: f64) -> Option<String> {
    let high = known(snapshot.high_52w)?;
    (price >= high * BREAKOUT_HIGH_RATIO).then(|| {
        let off_high = (1.0 - price / high) * 100.0;
        format!("Trading {:.1}% below the 52-week high ({:.2}), in breakout range", off_high, high)
    })
}

pub fn momentum(snapshot: &IndicatorSnapshot, price: f64) -> Option<String> {
    let ema20 = known(snapshot.ema20)?;
    let ema50 = known(snapshot.ema50)?;
    let sma200 = known(snapshot.sma200)?;
    let rsi = known(snapshot.rsi)?;
    (price > ema20 && price > ema50 && price > sma200 && rsi >= MOMENTUM_MIN_RSI).then(|| {
        format!("Above EMA20, EMA50 and SMA200 with RSI {:.1}", rsi)
    })
}

pub fn pullback(snapshot: &IndicatorSnapshot, price: f64) -> Option<String> {
    let ema20 = known(snapshot.ema20).filter(|v| *v > 0.0)?;
    let ema50 = known(snapshot.ema50)?;
    if price <= ema50 {
        return None;
    }
    let distance = (price - ema20) / ema20;
    (PULLBACK_BAND_LOW..=PULLBACK_BAND_HIGH)
        .contains(&distance)
        .then(|| format!("Pulling back to EMA20 ({:.2}), {:+.1}% away, above EMA50", ema20, distance * 100.0))
}

pub fn consolidation_breakout(snapshot: &IndicatorSnapshot, price: f64) -> Option<String> {
    let sma200 = known(snapshot.sma200)?;
    (price > sma200).then(|| format!("Holding above the 200-day SMA ({:.2})", sma200))
}
