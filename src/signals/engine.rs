//! Setup classification: rejection gates first, then bullish patterns.

use tracing::trace;

use crate::models::classification::{ClassificationResult, RejectDetails, RejectReason};
use crate::models::indicators::IndicatorSnapshot;
use crate::signals::gates::{usable_price, REJECTION_GATES};
use crate::signals::patterns::PATTERN_MATCHERS;

pub struct SetupClassifier;

impl SetupClassifier {
    /// Classify a snapshot. Pure and deterministic; never panics on missing data.
    pub fn classify(snapshot: &IndicatorSnapshot) -> ClassificationResult {
        for gate in REJECTION_GATES.iter() {
            if let Some(rejection) = (gate.check)(snapshot) {
                trace!(symbol = %snapshot.symbol, gate = gate.name, "Rejected by gate");
                return rejection;
            }
        }

        // The price gate guarantees a usable price here.
        let Some(price) = usable_price(snapshot) else {
            return ClassificationResult::rejected(
                RejectReason::InsufficientData,
                "No current price available",
                RejectDetails::default(),
            );
        };

        for matcher in PATTERN_MATCHERS.iter() {
            if let Some(message) = (matcher.check)(snapshot, price) {
                trace!(symbol = %snapshot.symbol, scan_type = %matcher.scan_type, "Pattern matched");
                return ClassificationResult::setup(matcher.scan_type, message);
            }
        }

        ClassificationResult::rejected(
            RejectReason::Unclear,
            "No bullish pattern matched the current structure",
            RejectDetails::default(),
        )
    }
}

/// Free-function form of [`SetupClassifier::classify`].
pub fn classify(snapshot: &IndicatorSnapshot) -> ClassificationResult {
    SetupClassifier::classify(snapshot)
}
