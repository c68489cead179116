//! Setup classification and scoring.

pub mod engine;
pub mod gates;
pub mod patterns;
pub mod rubrics;
pub mod scoring;

pub use engine::{classify, SetupClassifier};
pub use rubrics::{build_factors, rubric_for, RubricWeights};
pub use scoring::{grade_for, score, GRADE_TABLE};
