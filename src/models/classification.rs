//! Classification verdicts. A setup always carries its scan type and a
//! rejection always carries its reason.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanType {
    APlusMomentum,
    Breakout,
    Momentum,
    Pullback,
    ConsolidationBreakout,
}

impl ScanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanType::APlusMomentum => "a_plus_momentum",
            ScanType::Breakout => "breakout",
            ScanType::Momentum => "momentum",
            ScanType::Pullback => "pullback",
            ScanType::ConsolidationBreakout => "consolidation_breakout",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScanType::APlusMomentum => "A+ momentum",
            ScanType::Breakout => "Breakout",
            ScanType::Momentum => "Momentum",
            ScanType::Pullback => "Pullback",
            ScanType::ConsolidationBreakout => "Consolidation breakout",
        }
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    InsufficientData,
    #[serde(rename = "below_200sma")]
    Below200Sma,
    WeakMomentum,
    TrendBroken,
    Overbought,
    OverboughtDaily,
    Unclear,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::InsufficientData => "insufficient_data",
            RejectReason::Below200Sma => "below_200sma",
            RejectReason::WeakMomentum => "weak_momentum",
            RejectReason::TrendBroken => "trend_broken",
            RejectReason::Overbought => "overbought",
            RejectReason::OverboughtDaily => "overbought_daily",
            RejectReason::Unclear => "unclear",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Measurement that triggered a rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RejectDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// Percentage distance of price from the threshold level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_pct: Option<f64>,
}

impl RejectDetails {
    pub fn metric(metric: &str, value: f64, threshold: f64) -> Self {
        Self {
            metric: Some(metric.to_string()),
            value: Some(value),
            threshold: Some(threshold),
            distance_pct: None,
        }
    }

    pub fn with_distance_pct(mut self, distance_pct: f64) -> Self {
        self.distance_pct = Some(distance_pct);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClassificationResult {
    Setup {
        scan_type: ScanType,
        message: String,
    },
    Rejected {
        reason: RejectReason,
        message: String,
        details: RejectDetails,
    },
}

impl ClassificationResult {
    pub fn setup(scan_type: ScanType, message: impl Into<String>) -> Self {
        Self::Setup {
            scan_type,
            message: message.into(),
        }
    }

    pub fn rejected(reason: RejectReason, message: impl Into<String>, details: RejectDetails) -> Self {
        Self::Rejected {
            reason,
            message: message.into(),
            details,
        }
    }

    pub fn is_setup(&self) -> bool {
        matches!(self, Self::Setup { .. })
    }

    pub fn scan_type(&self) -> Option<ScanType> {
        match self {
            Self::Setup { scan_type, .. } => Some(*scan_type),
            Self::Rejected { .. } => None,
        }
    }

    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            Self::Setup { .. } => None,
            Self::Rejected { reason, .. } => Some(*reason),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Setup { message, .. } | Self::Rejected { message, .. } => message,
        }
    }
}
