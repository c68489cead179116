//! Structural swing levels: stops below the nearest support, targets at the
//! overhead resistances, with R-multiple fallbacks when structure is thin.

use crate::common::math::{known, round2};
use crate::indicators::structure::calculate_swing_range_default;
use crate::models::indicators::{Candle, IndicatorSnapshot};
use crate::models::levels::{Direction, EntryZone, SwingLevels};

const STOP_BUFFER_ATR: f64 = 0.25;
const STOP_BUFFER_PCT: f64 = 0.005;
const NO_SUPPORT_STOP_ATR: f64 = 1.5;
const ENTRY_ZONE_ATR: f64 = 0.25;
const ENTRY_ZONE_PCT: f64 = 0.005;
/// Resistances closer than this fraction of price are treated as "at price".
const MIN_RESISTANCE_GAP: f64 = 0.001;

fn support_candidates(snapshot: &IndicatorSnapshot, candles: &[Candle]) -> Vec<f64> {
    let swing_low = calculate_swing_range_default(candles).map(|r| r.swing_low);
    [
        snapshot.daily_s1,
        snapshot.weekly_s1,
        snapshot.ema20,
        swing_low,
    ]
    .into_iter()
    .filter_map(known)
    .filter(|v| *v > 0.0)
    .collect()
}

fn resistance_candidates(snapshot: &IndicatorSnapshot, candles: &[Candle]) -> Vec<f64> {
    let swing_high = calculate_swing_range_default(candles).map(|r| r.swing_high);
    [
        snapshot.daily_r1,
        snapshot.weekly_r1,
        snapshot.high_52w,
        swing_high,
    ]
    .into_iter()
    .filter_map(known)
    .collect()
}

/// Compute a long swing plan from the snapshot's structure and the recent candles.
///
/// `atr` overrides the snapshot's own ATR when supplied. Returns `None` when
/// price is unknown or neither a support nor an ATR is available to place a stop.
pub fn calculate_swing_levels(
    snapshot: &IndicatorSnapshot,
    candles: &[Candle],
    atr: Option<f64>,
) -> Option<SwingLevels> {
    let entry = known(snapshot.price).filter(|p| *p > 0.0)?;
    let atr = known(atr).filter(|a| *a > 0.0).or_else(|| snapshot.atr_value());

    let nearest_support = support_candidates(snapshot, candles)
        .into_iter()
        .filter(|s| *s < entry)
        .fold(None, |best: Option<f64>, s| Some(best.map_or(s, |b| b.max(s))));

    let stop = match (nearest_support, atr) {
        (Some(support), Some(atr)) => support - STOP_BUFFER_ATR * atr,
        (Some(support), None) => support * (1.0 - STOP_BUFFER_PCT),
        (None, Some(atr)) => entry - NO_SUPPORT_STOP_ATR * atr,
        (None, None) => return None,
    };
    if !(stop > 0.0 && stop < entry) {
        return None;
    }
    let risk = entry - stop;

    let mut resistances: Vec<f64> = resistance_candidates(snapshot, candles)
        .into_iter()
        .filter(|r| *r > entry * (1.0 + MIN_RESISTANCE_GAP))
        .collect();
    resistances.sort_by(|a, b| a.total_cmp(b));
    resistances.dedup();

    let target_1 = resistances
        .iter()
        .copied()
        .find(|r| r - entry >= risk)
        .unwrap_or(entry + 2.0 * risk);
    let target_2 = resistances
        .iter()
        .copied()
        .find(|r| *r > target_1)
        .unwrap_or_else(|| (entry + 3.0 * risk).max(target_1 + risk));
    let target_3 = (entry + 4.0 * risk).max(target_2 + risk);

    let entry_zone = match atr {
        Some(atr) => EntryZone {
            low: round2(entry - ENTRY_ZONE_ATR * atr),
            high: round2(entry + ENTRY_ZONE_ATR * atr),
        },
        None => EntryZone {
            low: round2(entry * (1.0 - ENTRY_ZONE_PCT)),
            high: round2(entry * (1.0 + ENTRY_ZONE_PCT)),
        },
    };

    let reward = target_1 - entry;
    Some(SwingLevels {
        direction: Direction::Buy,
        entry: round2(entry),
        entry_zone,
        stop_loss: round2(stop),
        target_1: round2(target_1),
        target_2: round2(target_2),
        target_3: round2(target_3),
        risk_reward: round2(reward / risk),
        risk_percent: round2(risk / entry * 100.0),
        reward_percent: round2(reward / entry * 100.0),
    })
}
