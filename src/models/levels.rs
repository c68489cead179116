//! Price level models. Each variant carries exactly the fields that are
//! meaningful for it, so a NEUTRAL plan has no stop and an AVOID plan has
//! nothing but gap metrics.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Buy,
    Sell,
    Neutral,
    Avoid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NewsImpact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntryZone {
    pub low: f64,
    pub high: f64,
}

/// ATR figures shared by every intraday plan that got past the gap check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtrBasis {
    pub atr: f64,
    pub adjusted_atr: f64,
    pub atr_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLevels {
    pub entry: f64,
    pub entry_zone: EntryZone,
    pub stop_loss: f64,
    pub target_1: f64,
    pub target_2: f64,
    #[serde(flatten)]
    pub basis: AtrBasis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeutralLevels {
    pub entry: f64,
    pub entry_zone: EntryZone,
    pub message: String,
    #[serde(flatten)]
    pub basis: AtrBasis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapAvoidance {
    pub prev_close: f64,
    pub opening_price: f64,
    pub gap: f64,
    pub gap_threshold: f64,
    pub message: String,
    #[serde(flatten)]
    pub basis: AtrBasis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "direction", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntradayLevels {
    Buy(DirectionalLevels),
    Sell(DirectionalLevels),
    Neutral(NeutralLevels),
    Avoid(GapAvoidance),
}

impl IntradayLevels {
    pub fn direction(&self) -> Direction {
        match self {
            IntradayLevels::Buy(_) => Direction::Buy,
            IntradayLevels::Sell(_) => Direction::Sell,
            IntradayLevels::Neutral(_) => Direction::Neutral,
            IntradayLevels::Avoid(_) => Direction::Avoid,
        }
    }

    pub fn basis(&self) -> &AtrBasis {
        match self {
            IntradayLevels::Buy(l) | IntradayLevels::Sell(l) => &l.basis,
            IntradayLevels::Neutral(l) => &l.basis,
            IntradayLevels::Avoid(l) => &l.basis,
        }
    }
}

/// Structural (pivot / swing) plan for a long position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwingLevels {
    pub direction: Direction,
    pub entry: f64,
    pub entry_zone: EntryZone,
    pub stop_loss: f64,
    pub target_1: f64,
    pub target_2: f64,
    pub target_3: f64,
    pub risk_reward: f64,
    pub risk_percent: f64,
    pub reward_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum Levels {
    Intraday(IntradayLevels),
    Swing(SwingLevels),
}

impl Levels {
    pub fn direction(&self) -> Direction {
        match self {
            Levels::Intraday(levels) => levels.direction(),
            Levels::Swing(levels) => levels.direction,
        }
    }

    /// Reward-to-risk measured to the first target, when the plan has one.
    pub fn risk_reward(&self) -> Option<f64> {
        match self {
            Levels::Swing(levels) => Some(levels.risk_reward),
            Levels::Intraday(IntradayLevels::Buy(l) | IntradayLevels::Sell(l)) => {
                let risk = (l.entry - l.stop_loss).abs();
                (risk > 0.0).then(|| ((l.target_1 - l.entry).abs() / risk * 100.0).round() / 100.0)
            }
            Levels::Intraday(_) => None,
        }
    }

    pub fn entry(&self) -> Option<f64> {
        match self {
            Levels::Swing(levels) => Some(levels.entry),
            Levels::Intraday(IntradayLevels::Buy(l) | IntradayLevels::Sell(l)) => Some(l.entry),
            Levels::Intraday(IntradayLevels::Neutral(l)) => Some(l.entry),
            Levels::Intraday(IntradayLevels::Avoid(_)) => None,
        }
    }

    pub fn first_target(&self) -> Option<f64> {
        match self {
            Levels::Swing(levels) => Some(levels.target_1),
            Levels::Intraday(IntradayLevels::Buy(l) | IntradayLevels::Sell(l)) => Some(l.target_1),
            Levels::Intraday(_) => None,
        }
    }
}
