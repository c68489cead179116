//! Recent swing range used as structural support/resistance

use crate::indicators::ascending;
use crate::models::indicators::Candle;

pub const SWING_LOW_LOOKBACK: usize = 10;
pub const SWING_HIGH_LOOKBACK: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingRange {
    pub swing_low: f64,
    pub swing_high: f64,
}

/// Lowest low over the last `low_lookback` candles and highest high over the
/// last `high_lookback`. Uses whatever is available when history is shorter.
pub fn calculate_swing_range(
    candles: &[Candle],
    low_lookback: usize,
    high_lookback: usize,
) -> Option<SwingRange> {
    if candles.is_empty() || low_lookback == 0 || high_lookback == 0 {
        return None;
    }

    let candles = ascending(candles);
    let low_window = &candles[candles.len().saturating_sub(low_lookback)..];
    let high_window = &candles[candles.len().saturating_sub(high_lookback)..];

    let swing_low = low_window
        .iter()
        .map(|c| c.low)
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold(f64::INFINITY, f64::min);
    let swing_high = high_window
        .iter()
        .map(|c| c.high)
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);

    if !swing_low.is_finite() || !swing_high.is_finite() {
        return None;
    }

    Some(SwingRange {
        swing_low,
        swing_high,
    })
}

/// Swing range with default lookbacks (10 for lows, 20 for highs)
pub fn calculate_swing_range_default(candles: &[Candle]) -> Option<SwingRange> {
    calculate_swing_range(candles, SWING_LOW_LOOKBACK, SWING_HIGH_LOOKBACK)
}
