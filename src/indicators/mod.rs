//! Indicator calculations over candle sequences.

pub mod structure;
pub mod volatility;

pub use structure::*;
pub use volatility::*;

use crate::models::indicators::Candle;
use std::borrow::Cow;

/// Candles in ascending timestamp order, copying only when the input is unsorted.
pub fn ascending(candles: &[Candle]) -> Cow<'_, [Candle]> {
    if candles.windows(2).all(|w| w[0].timestamp <= w[1].timestamp) {
        Cow::Borrowed(candles)
    } else {
        let mut sorted = candles.to_vec();
        sorted.sort_by_key(|c| c.timestamp);
        Cow::Owned(sorted)
    }
}
