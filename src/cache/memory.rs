//! In-process card store.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{CacheError, CardKey, CardStore};
use crate::models::card::{AnalysisCard, AnalysisKind};

#[derive(Default)]
pub struct InMemoryCardStore {
    cards: RwLock<BTreeMap<CardKey, AnalysisCard>>,
}

impl InMemoryCardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.cards.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cards.read().await.is_empty()
    }

    /// Every stored card for an instrument and kind, oldest freshness key first.
    pub async fn history(&self, instrument: &str, kind: AnalysisKind) -> Vec<AnalysisCard> {
        let instrument = instrument.trim().to_uppercase();
        self.cards
            .read()
            .await
            .iter()
            .filter(|(key, _)| key.instrument == instrument && key.kind == kind)
            .map(|(_, card)| card.clone())
            .collect()
    }
}

#[async_trait]
impl CardStore for InMemoryCardStore {
    async fn get(&self, key: &CardKey) -> Result<Option<AnalysisCard>, CacheError> {
        Ok(self.cards.read().await.get(key).cloned())
    }

    async fn upsert(&self, key: &CardKey, card: &AnalysisCard) -> Result<(), CacheError> {
        self.cards.write().await.insert(key.clone(), card.clone());
        Ok(())
    }
}
