//! Analysis card storage and freshness control.

pub mod freshness;
pub mod memory;
pub mod redis_store;

pub use freshness::{FreshnessController, FreshnessPolicy, QuickRejectWindow, Resolution};
pub use memory::InMemoryCardStore;
pub use redis_store::RedisCardStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::card::{AnalysisCard, AnalysisKind};

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("card serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Storage key: one record per instrument, analysis kind and freshness key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardKey {
    pub instrument: String,
    pub kind: AnalysisKind,
    pub freshness_key: String,
}

impl CardKey {
    pub fn new(instrument: &str, kind: AnalysisKind, freshness_key: &str) -> Self {
        Self {
            instrument: instrument.trim().to_uppercase(),
            kind,
            freshness_key: freshness_key.to_string(),
        }
    }

    pub fn storage_key(&self) -> String {
        format!("analysis:{}:{}:{}", self.instrument, self.kind, self.freshness_key)
    }
}

/// Get-by-key / upsert-by-key over analysis cards.
#[async_trait]
pub trait CardStore: Send + Sync {
    async fn get(&self, key: &CardKey) -> Result<Option<AnalysisCard>, CacheError>;

    /// Insert or replace the record under `key`. Records under other keys are untouched.
    async fn upsert(&self, key: &CardKey, card: &AnalysisCard) -> Result<(), CacheError>;
}
