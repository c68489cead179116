//! Risk warnings, evaluated independently of the score.

use crate::common::math::known;
use crate::models::card::{Severity, Warning};
use crate::models::indicators::IndicatorSnapshot;
use crate::models::levels::Levels;

pub const LOW_VOLUME_RATIO: f64 = 0.8;
pub const HOT_RSI: f64 = 65.0;
pub const HIGH_ATR_PCT: f64 = 4.0;
pub const MIN_RISK_REWARD: f64 = 1.5;

fn warning(code: &str, severity: Severity, message: String, mitigation: &str) -> Warning {
    Warning {
        code: code.to_string(),
        severity,
        message,
        mitigation: mitigation.to_string(),
    }
}

pub fn collect_warnings(snapshot: &IndicatorSnapshot, levels: Option<&Levels>) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if let Some(ratio) = known(snapshot.volume_vs_avg).filter(|r| *r < LOW_VOLUME_RATIO) {
        warnings.push(warning(
            "low_volume",
            Severity::Medium,
            format!("Volume is only {:.2}x the average", ratio),
            "Wait for volume confirmation or trade a smaller size",
        ));
    }

    if let Some(rsi) = known(snapshot.rsi).filter(|r| *r > HOT_RSI) {
        warnings.push(warning(
            "elevated_rsi",
            Severity::Medium,
            format!("Daily RSI {:.1} is running hot", rsi),
            "Prefer entries in the lower half of the entry zone",
        ));
    }

    if let Some(atr_pct) = known(snapshot.atr_pct).filter(|a| *a > HIGH_ATR_PCT) {
        warnings.push(warning(
            "high_volatility",
            Severity::High,
            format!("ATR is {:.2}% of price", atr_pct),
            "Reduce position size so the stop distance fits your risk budget",
        ));
    }

    if let Some(rr) = levels.and_then(Levels::risk_reward).filter(|rr| *rr < MIN_RISK_REWARD) {
        warnings.push(warning(
            "poor_risk_reward",
            Severity::High,
            format!("Reward/risk of {:.2} is below {:.1}", rr, MIN_RISK_REWARD),
            "Only take the trade from the low end of the entry zone, or pass",
        ));
    }

    warnings
}
