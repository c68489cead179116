//! The externally visible analysis artifact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::classification::{RejectReason, ScanType};
use crate::models::levels::Levels;
use crate::models::score::{Grade, Rubric, ScoreLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    Swing,
    Intraday,
}

impl AnalysisKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Swing => "swing",
            AnalysisKind::Intraday => "intraday",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AnalysisKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "swing" => Ok(AnalysisKind::Swing),
            "intraday" => Ok(AnalysisKind::Intraday),
            other => Err(format!("unknown analysis kind '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Buy,
    Wait,
    Skip,
    NoTrade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub action: Action,
    pub confidence: Confidence,
    pub one_liner: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupScore {
    pub total: u32,
    pub grade: Grade,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breakdown: Vec<ScoreLine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strengths: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub watch: Vec<String>,
}

impl SetupScore {
    pub fn zero() -> Self {
        Self {
            total: 0,
            grade: Grade::F,
            breakdown: Vec::new(),
            strengths: Vec::new(),
            watch: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchLevel {
    pub label: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickReject {
    pub reason: RejectReason,
    pub price: Option<f64>,
    pub levels_to_watch: Vec<WatchLevel>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingPlan {
    pub scan_type: ScanType,
    pub setup_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rubric: Option<Rubric>,
    pub levels: Option<Levels>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub code: String,
    pub severity: Severity,
    pub message: String,
    pub mitigation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardBody {
    TradingPlan(TradingPlan),
    QuickReject(QuickReject),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisCard {
    pub symbol: String,
    pub kind: AnalysisKind,
    pub verdict: Verdict,
    pub setup_score: SetupScore,
    #[serde(flatten)]
    pub body: CardBody,
    pub warnings: Vec<Warning>,
    pub generated_at: DateTime<Utc>,
    pub freshness_key: String,
    /// Set only on quick rejects; full cards live as long as their freshness key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
}

impl AnalysisCard {
    pub fn is_quick_reject(&self) -> bool {
        matches!(self.body, CardBody::QuickReject(_))
    }

    pub fn quick_reject(&self) -> Option<&QuickReject> {
        match &self.body {
            CardBody::QuickReject(reject) => Some(reject),
            CardBody::TradingPlan(_) => None,
        }
    }

    pub fn trading_plan(&self) -> Option<&TradingPlan> {
        match &self.body {
            CardBody::TradingPlan(plan) => Some(plan),
            CardBody::QuickReject(_) => None,
        }
    }
}
