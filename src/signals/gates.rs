//! Ordered rejection gates. Each gate inspects the snapshot and either lets it
//! through (`None`) or rejects it. Gates whose inputs are absent pass.

use crate::common::math::{known, pct_distance, round2};
use crate::models::classification::{ClassificationResult, RejectDetails, RejectReason};
use crate::models::indicators::IndicatorSnapshot;

pub const WEAK_RSI: f64 = 35.0;
pub const OVERBOUGHT_RSI: f64 = 72.0;

pub type GateCheck = fn(&IndicatorSnapshot) -> Option<ClassificationResult>;

#[derive(Clone, Copy)]
pub struct Gate {
    pub name: &'static str,
    pub check: GateCheck,
}

/// Rejection gates in priority order; the first rejection wins.
pub const REJECTION_GATES: [Gate; 6] = [
    Gate {
        name: "price",
        check: price_gate,
    },
    Gate {
        name: "sma200",
        check: sma200_gate,
    },
    Gate {
        name: "weak_rsi",
        check: weak_momentum_gate,
    },
    Gate {
        name: "trend",
        check: trend_gate,
    },
    Gate {
        name: "weekly_rsi",
        check: weekly_overbought_gate,
    },
    Gate {
        name: "daily_rsi",
        check: daily_overbought_gate,
    },
];

/// Price if present, finite and positive.
pub fn usable_price(snapshot: &IndicatorSnapshot) -> Option<f64> {
    known(snapshot.price).filter(|p| *p > 0.0)
}

pub fn price_gate(snapshot: &IndicatorSnapshot) -> Option<ClassificationResult> {
    if usable_price(snapshot).is_some() {
        return None;
    }
    let details = RejectDetails {
        metric: Some("price".to_string()),
        value: known(snapshot.price),
        ..RejectDetails::default()
    };
    let message = match known(snapshot.price) {
        Some(price) => format!("Price {:.2} is not a valid positive quote", price),
        None => "No current price available".to_string(),
    };
    Some(ClassificationResult::rejected(RejectReason::InsufficientData, message, details))
}

pub fn sma200_gate(snapshot: &IndicatorSnapshot) -> Option<ClassificationResult> {
    let price = usable_price(snapshot)?;
    let sma200 = known(snapshot.sma200)?;
    if price >= sma200 {
        return None;
    }
    let below_pct = round2(-pct_distance(price, sma200)?);
    Some(ClassificationResult::rejected(
        RejectReason::Below200Sma,
        format!(
            "Price {:.2} is {:.2}% below the 200-day SMA ({:.2})",
            price, below_pct, sma200
        ),
        RejectDetails::metric("sma200", price, sma200).with_distance_pct(below_pct),
    ))
}

pub fn weak_momentum_gate(snapshot: &IndicatorSnapshot) -> Option<ClassificationResult> {
    let rsi = known(snapshot.rsi)?;
    if rsi >= WEAK_RSI {
        return None;
    }
    Some(ClassificationResult::rejected(
        RejectReason::WeakMomentum,
        format!("Daily RSI {:.1} is below {}", rsi, WEAK_RSI),
        RejectDetails::metric("rsi", rsi, WEAK_RSI),
    ))
}

pub fn trend_gate(snapshot: &IndicatorSnapshot) -> Option<ClassificationResult> {
    let price = usable_price(snapshot)?;
    let ema20 = known(snapshot.ema20)?;
    let ema50 = known(snapshot.ema50)?;
    if !(price < ema50 && price < ema20) {
        return None;
    }
    let distance = pct_distance(price, ema50).map(round2);
    let mut details = RejectDetails::metric("ema50", price, ema50);
    details.distance_pct = distance;
    Some(ClassificationResult::rejected(
        RejectReason::TrendBroken,
        format!(
            "Price {:.2} is below both EMA20 ({:.2}) and EMA50 ({:.2})",
            price, ema20, ema50
        ),
        details,
    ))
}

pub fn weekly_overbought_gate(snapshot: &IndicatorSnapshot) -> Option<ClassificationResult> {
    let weekly_rsi = known(snapshot.weekly_rsi)?;
    if weekly_rsi <= OVERBOUGHT_RSI {
        return None;
    }
    Some(ClassificationResult::rejected(
        RejectReason::Overbought,
        format!("Weekly RSI {:.1} is above {}", weekly_rsi, OVERBOUGHT_RSI),
        RejectDetails::metric("weekly_rsi", weekly_rsi, OVERBOUGHT_RSI),
    ))
}

pub fn daily_overbought_gate(snapshot: &IndicatorSnapshot) -> Option<ClassificationResult> {
    let rsi = known(snapshot.rsi)?;
    if rsi <= OVERBOUGHT_RSI {
        return None;
    }
    Some(ClassificationResult::rejected(
        RejectReason::OverboughtDaily,
        format!("Daily RSI {:.1} is above {}", rsi, OVERBOUGHT_RSI),
        RejectDetails::metric("rsi", rsi, OVERBOUGHT_RSI),
    ))
}
