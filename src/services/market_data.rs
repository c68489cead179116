//! Indicator provider interface. Fetching and computing indicators happens
//! outside this crate; the pipeline only consumes the results.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

use crate::models::indicators::{Candle, IndicatorSnapshot};
use crate::models::levels::{NewsImpact, Sentiment};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("symbol not found: {symbol}")]
    NotFound { symbol: String },

    #[error("indicator provider unavailable: {0}")]
    Unavailable(String),
}

/// Session context for intraday plans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntradayContext {
    pub sentiment: Sentiment,
    pub news_impact: Option<NewsImpact>,
    pub opening_price: Option<f64>,
}

impl Default for IntradayContext {
    fn default() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            news_impact: None,
            opening_price: None,
        }
    }
}

#[async_trait]
pub trait IndicatorProvider: Send + Sync {
    /// Latest indicator snapshot for a symbol
    async fn snapshot(&self, symbol: &str) -> Result<IndicatorSnapshot, ProviderError>;

    /// Most recent daily candles, at most `limit`
    async fn candles(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, ProviderError>;

    async fn intraday_context(&self, _symbol: &str) -> Result<IntradayContext, ProviderError> {
        Ok(IntradayContext::default())
    }
}

#[derive(Debug, Clone)]
struct Fixture {
    snapshot: IndicatorSnapshot,
    candles: Vec<Candle>,
    intraday: IntradayContext,
}

/// Provider serving pre-loaded fixtures.
#[derive(Debug, Clone, Default)]
pub struct StaticIndicatorProvider {
    fixtures: HashMap<String, Fixture>,
}

impl StaticIndicatorProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(mut self, snapshot: IndicatorSnapshot, candles: Vec<Candle>) -> Self {
        let key = snapshot.symbol.trim().to_uppercase();
        self.fixtures.insert(
            key,
            Fixture {
                snapshot,
                candles,
                intraday: IntradayContext::default(),
            },
        );
        self
    }

    pub fn with_intraday_context(mut self, symbol: &str, context: IntradayContext) -> Self {
        if let Some(fixture) = self.fixtures.get_mut(&symbol.trim().to_uppercase()) {
            fixture.intraday = context;
        }
        self
    }

    fn fixture(&self, symbol: &str) -> Result<&Fixture, ProviderError> {
        self.fixtures
            .get(&symbol.trim().to_uppercase())
            .ok_or_else(|| ProviderError::NotFound {
                symbol: symbol.to_string(),
            })
    }
}

#[async_trait]
impl IndicatorProvider for StaticIndicatorProvider {
    async fn snapshot(&self, symbol: &str) -> Result<IndicatorSnapshot, ProviderError> {
        Ok(self.fixture(symbol)?.snapshot.clone())
    }

    async fn candles(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, ProviderError> {
        let mut candles = self.fixture(symbol)?.candles.clone();
        candles.sort_by_key(|c| c.timestamp);
        if candles.len() > limit {
            candles = candles.split_off(candles.len() - limit);
        }
        Ok(candles)
    }

    async fn intraday_context(&self, symbol: &str) -> Result<IntradayContext, ProviderError> {
        Ok(self.fixture(symbol)?.intraday)
    }
}
