//! Core orchestration

pub mod pipeline;

pub use pipeline::{AnalysisPipeline, PipelineError};
