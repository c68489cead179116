//! Volatility-based intraday levels anchored on the previous session close.

use crate::common::math::round2;
use crate::models::indicators::Candle;
use crate::models::levels::{
    AtrBasis, DirectionalLevels, EntryZone, GapAvoidance, IntradayLevels, NeutralLevels,
    NewsImpact, Sentiment,
};

const ENTRY_ZONE_ATR: f64 = 0.3;
const STOP_ATR: f64 = 1.0;
const TARGET_1_ATR: f64 = 1.2;
const TARGET_2_ATR: f64 = 2.0;
/// Opening gaps wider than this many adjusted ATRs are not traded.
const MAX_GAP_ATR: f64 = 1.2;

#[derive(Debug, Clone)]
pub struct IntradayParams {
    pub prev_day_candle: Candle,
    pub atr14: f64,
    pub sentiment: Sentiment,
    pub news_impact: Option<NewsImpact>,
    pub opening_price: Option<f64>,
}

/// ATR multiplier for the news backdrop; unknown impact leaves ATR unchanged.
pub fn news_multiplier(news_impact: Option<NewsImpact>) -> f64 {
    match news_impact {
        Some(NewsImpact::High) => 1.75,
        Some(NewsImpact::Medium) => 1.25,
        Some(NewsImpact::Low) | None => 1.0,
    }
}

/// Compute intraday levels. Returns `None` when the ATR or the previous close
/// is unusable.
pub fn calculate_intraday_levels(params: &IntradayParams) -> Option<IntradayLevels> {
    let prev_close = params.prev_day_candle.close;
    if !(params.atr14.is_finite() && params.atr14 > 0.0) || !(prev_close.is_finite() && prev_close > 0.0) {
        return None;
    }

    let atr_multiplier = news_multiplier(params.news_impact);
    let adjusted_atr = round2(params.atr14 * atr_multiplier);
    let basis = AtrBasis {
        atr: round2(params.atr14),
        adjusted_atr,
        atr_multiplier,
    };

    if let Some(opening_price) = params.opening_price.filter(|p| p.is_finite() && *p > 0.0) {
        let gap = (opening_price - prev_close).abs();
        let gap_threshold = MAX_GAP_ATR * adjusted_atr;
        if gap > gap_threshold {
            return Some(IntradayLevels::Avoid(GapAvoidance {
                prev_close: round2(prev_close),
                opening_price: round2(opening_price),
                gap: round2(gap),
                gap_threshold: round2(gap_threshold),
                message: format!(
                    "Opening gap of {:.2} exceeds {:.2} ({}x adjusted ATR); skip the session",
                    gap, gap_threshold, MAX_GAP_ATR
                ),
                basis,
            }));
        }
    }

    let entry_zone = EntryZone {
        low: round2(prev_close - ENTRY_ZONE_ATR * adjusted_atr),
        high: round2(prev_close + ENTRY_ZONE_ATR * adjusted_atr),
    };
    let entry = round2(prev_close);

    let levels = match params.sentiment {
        Sentiment::Bullish => IntradayLevels::Buy(DirectionalLevels {
            entry,
            entry_zone,
            stop_loss: round2(prev_close - STOP_ATR * adjusted_atr),
            target_1: round2(prev_close + TARGET_1_ATR * adjusted_atr),
            target_2: round2(prev_close + TARGET_2_ATR * adjusted_atr),
            basis,
        }),
        Sentiment::Bearish => IntradayLevels::Sell(DirectionalLevels {
            entry,
            entry_zone,
            stop_loss: round2(prev_close + STOP_ATR * adjusted_atr),
            target_1: round2(prev_close - TARGET_1_ATR * adjusted_atr),
            target_2: round2(prev_close - TARGET_2_ATR * adjusted_atr),
            basis,
        }),
        Sentiment::Neutral => IntradayLevels::Neutral(NeutralLevels {
            entry,
            entry_zone,
            message: "No directional bias; trade only a confirmed break out of the entry zone"
                .to_string(),
            basis,
        }),
    };

    Some(levels)
}
