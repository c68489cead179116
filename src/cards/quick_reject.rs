//! Quick-reject payloads: which levels to watch and what to tell the user for
//! each rejection reason.

use crate::common::math::{known, pct_distance};
use crate::models::card::{QuickReject, WatchLevel};
use crate::models::classification::RejectReason;
use crate::models::indicators::IndicatorSnapshot;

/// Snapshot field that can be offered as a level to watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotLevel {
    Ema20,
    Ema50,
    Sma200,
    High52W,
    TodaysLow,
    DailyR1,
    DailyS1,
    WeeklyR1,
    WeeklyS1,
}

impl SnapshotLevel {
    pub fn label(&self) -> &'static str {
        match self {
            SnapshotLevel::Ema20 => "ema20",
            SnapshotLevel::Ema50 => "ema50",
            SnapshotLevel::Sma200 => "sma200",
            SnapshotLevel::High52W => "high_52w",
            SnapshotLevel::TodaysLow => "todays_low",
            SnapshotLevel::DailyR1 => "daily_r1",
            SnapshotLevel::DailyS1 => "daily_s1",
            SnapshotLevel::WeeklyR1 => "weekly_r1",
            SnapshotLevel::WeeklyS1 => "weekly_s1",
        }
    }

    pub fn read(&self, snapshot: &IndicatorSnapshot) -> Option<f64> {
        known(match self {
            SnapshotLevel::Ema20 => snapshot.ema20,
            SnapshotLevel::Ema50 => snapshot.ema50,
            SnapshotLevel::Sma200 => snapshot.sma200,
            SnapshotLevel::High52W => snapshot.high_52w,
            SnapshotLevel::TodaysLow => snapshot.todays_low,
            SnapshotLevel::DailyR1 => snapshot.daily_r1,
            SnapshotLevel::DailyS1 => snapshot.daily_s1,
            SnapshotLevel::WeeklyR1 => snapshot.weekly_r1,
            SnapshotLevel::WeeklyS1 => snapshot.weekly_s1,
        })
    }
}

/// Levels worth watching for each rejection reason.
pub fn levels_to_watch_for(reason: RejectReason) -> &'static [SnapshotLevel] {
    use SnapshotLevel::*;
    match reason {
        RejectReason::InsufficientData => &[],
        RejectReason::Below200Sma => &[Sma200, DailyS1, WeeklyS1],
        RejectReason::WeakMomentum => &[Ema20, DailyS1, TodaysLow],
        RejectReason::TrendBroken => &[Ema20, Ema50, WeeklyS1],
        RejectReason::Overbought => &[Ema20, WeeklyS1, WeeklyR1],
        RejectReason::OverboughtDaily => &[Ema20, DailyS1, DailyR1],
        RejectReason::Unclear => &[Sma200, High52W],
    }
}

fn fmt_level(snapshot: &IndicatorSnapshot, level: SnapshotLevel) -> String {
    level
        .read(snapshot)
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "n/a".to_string())
}

fn reject_message(reason: RejectReason, snapshot: &IndicatorSnapshot) -> String {
    let symbol = &snapshot.symbol;
    match reason {
        RejectReason::InsufficientData => {
            format!("{}: not enough market data to evaluate a setup right now.", symbol)
        }
        RejectReason::Below200Sma => {
            let below = match (known(snapshot.price), SnapshotLevel::Sma200.read(snapshot)) {
                (Some(price), Some(sma)) => pct_distance(price, sma).map(|d| format!("{:.1}% ", -d)),
                _ => None,
            }
            .unwrap_or_default();
            format!(
                "{} trades {}below its 200-day SMA ({}). Wait for a reclaim before looking for longs.",
                symbol,
                below,
                fmt_level(snapshot, SnapshotLevel::Sma200)
            )
        }
        RejectReason::WeakMomentum => format!(
            "{} has weak momentum (RSI {}). Let it stabilise above EMA20 ({}) first.",
            symbol,
            known(snapshot.rsi).map(|r| format!("{:.1}", r)).unwrap_or_else(|| "n/a".to_string()),
            fmt_level(snapshot, SnapshotLevel::Ema20)
        ),
        RejectReason::TrendBroken => format!(
            "{} is below both EMA20 ({}) and EMA50 ({}). The short-term trend is broken.",
            symbol,
            fmt_level(snapshot, SnapshotLevel::Ema20),
            fmt_level(snapshot, SnapshotLevel::Ema50)
        ),
        RejectReason::Overbought => format!(
            "{} is overbought on the weekly chart (RSI {}). Wait for a pullback toward EMA20 ({}).",
            symbol,
            known(snapshot.weekly_rsi).map(|r| format!("{:.1}", r)).unwrap_or_else(|| "n/a".to_string()),
            fmt_level(snapshot, SnapshotLevel::Ema20)
        ),
        RejectReason::OverboughtDaily => format!(
            "{} is stretched on the daily chart (RSI {}). Chasing here risks a sharp pullback.",
            symbol,
            known(snapshot.rsi).map(|r| format!("{:.1}", r)).unwrap_or_else(|| "n/a".to_string())
        ),
        RejectReason::Unclear => format!(
            "{} shows no clear bullish structure. Revisit above the 200-day SMA ({}).",
            symbol,
            fmt_level(snapshot, SnapshotLevel::Sma200)
        ),
    }
}

pub fn build_quick_reject(reason: RejectReason, snapshot: &IndicatorSnapshot) -> QuickReject {
    let levels_to_watch = levels_to_watch_for(reason)
        .iter()
        .filter_map(|level| {
            level.read(snapshot).map(|price| WatchLevel {
                label: level.label().to_string(),
                price,
            })
        })
        .collect();

    QuickReject {
        reason,
        price: known(snapshot.price),
        levels_to_watch,
        message: reject_message(reason, snapshot),
    }
}
