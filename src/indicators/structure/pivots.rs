//! Classic pivot points

use crate::common::math::round2;
use crate::models::indicators::{Candle, PivotSet};

/// Floor-trader pivots from one bar. Reference output only.
pub fn calculate_pivot_points(candle: &Candle) -> PivotSet {
    let (high, low, close) = (candle.high, candle.low, candle.close);
    let pivot = (high + low + close) / 3.0;
    let range = high - low;

    PivotSet {
        pivot: round2(pivot),
        r1: round2(2.0 * pivot - low),
        r2: round2(pivot + range),
        s1: round2(2.0 * pivot - high),
        s2: round2(pivot - range),
    }
}
