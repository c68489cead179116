//! ATR (Average True Range) indicator

use crate::common::math;
use crate::indicators::ascending;
use crate::models::indicators::Candle;

pub const DEFAULT_ATR_PERIOD: usize = 14;

/// Calculate ATR (Average True Range)
///
/// Simple mean of the most recent `period` true ranges, rounded to cents.
/// Needs `period + 1` candles; returns `None` otherwise or when the range is flat.
pub fn calculate_atr(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < period + 1 {
        return None;
    }

    let candles = ascending(candles);
    let tr_values: Vec<f64> = candles
        .windows(2)
        .map(|w| math::true_range(w[1].high, w[1].low, w[0].close))
        .collect();

    let atr = math::round2(math::sma(&tr_values, period)?);
    if atr.is_finite() && atr > 0.0 {
        Some(atr)
    } else {
        None
    }
}

/// Calculate ATR with default period (14)
pub fn calculate_atr_default(candles: &[Candle]) -> Option<f64> {
    calculate_atr(candles, DEFAULT_ATR_PERIOD)
}
