use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grade. Declared best-first; see `signals::scoring::GRADE_TABLE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rubric {
    Momentum,
    Pullback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorTag {
    Strength,
    Neutral,
    Watch,
}

/// One rubric input before scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub name: String,
    pub raw_value: Option<f64>,
    pub points: u32,
    pub max: u32,
    pub reason: String,
}

impl Factor {
    pub fn new(name: &str, raw_value: Option<f64>, points: u32, max: u32, reason: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            raw_value,
            points,
            max,
            reason: reason.into(),
        }
    }

    /// Zero-point factor for an input the snapshot did not carry.
    pub fn missing(name: &str, max: u32) -> Self {
        Self::new(name, None, 0, max, "no data available")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub factor: String,
    pub points: u32,
    pub max: u32,
    pub reason: String,
    pub tag: FactorTag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub rubric: Rubric,
    pub total: u32,
    pub grade: Grade,
    pub breakdown: Vec<ScoreLine>,
}

impl ScoreResult {
    pub fn strengths(&self) -> Vec<&str> {
        self.tagged(FactorTag::Strength)
    }

    pub fn watch_items(&self) -> Vec<&str> {
        self.tagged(FactorTag::Watch)
    }

    fn tagged(&self, tag: FactorTag) -> Vec<&str> {
        self.breakdown
            .iter()
            .filter(|line| line.tag == tag)
            .map(|line| line.factor.as_str())
            .collect()
    }
}
