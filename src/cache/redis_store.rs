//! Redis-backed card store. Cards are JSON strings with no TTL so earlier
//! freshness keys remain available as history.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::debug;

use super::{CacheError, CardKey, CardStore};
use crate::models::card::AnalysisCard;

#[derive(Clone)]
pub struct RedisCardStore {
    conn: ConnectionManager,
}

impl RedisCardStore {
    pub async fn new(redis_url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl CardStore for RedisCardStore {
    async fn get(&self, key: &CardKey) -> Result<Option<AnalysisCard>, CacheError> {
        let storage_key = key.storage_key();
        let value: Option<String> = self.conn.clone().get(&storage_key).await?;

        match value {
            Some(json) => {
                let card: AnalysisCard = serde_json::from_str(&json)?;
                debug!(key = %storage_key, "Loaded analysis card from Redis");
                Ok(Some(card))
            }
            None => Ok(None),
        }
    }

    async fn upsert(&self, key: &CardKey, card: &AnalysisCard) -> Result<(), CacheError> {
        let storage_key = key.storage_key();
        let json = serde_json::to_string(card)?;
        let _: () = self.conn.clone().set(&storage_key, json).await?;
        debug!(key = %storage_key, "Stored analysis card in Redis");
        Ok(())
    }
}
