//! Shared data models spanning the engine layers.

pub mod card;
pub mod classification;
pub mod indicators;
pub mod levels;
pub mod score;

pub use card::{
    Action, AnalysisCard, AnalysisKind, CardBody, Confidence, QuickReject, SetupScore, Severity,
    TradingPlan, Verdict, Warning, WatchLevel,
};
pub use classification::{ClassificationResult, RejectDetails, RejectReason, ScanType};
pub use indicators::{Candle, IndicatorSnapshot, PivotSet};
pub use levels::{
    AtrBasis, Direction, DirectionalLevels, EntryZone, GapAvoidance, IntradayLevels, Levels,
    NeutralLevels, NewsImpact, Sentiment, SwingLevels,
};
pub use score::{Factor, FactorTag, Grade, Rubric, ScoreLine, ScoreResult};
