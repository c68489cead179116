//! End-to-end analysis: freshness lookup, classification, levels, scoring,
//! card assembly and write-back.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::{CardStore, FreshnessController, Resolution};
use crate::cards::{build_card, CardContext};
use crate::config::Config;
use crate::indicators::{ascending, calculate_atr, DEFAULT_ATR_PERIOD};
use crate::levels::{calculate_intraday_levels, calculate_swing_levels, IntradayParams};
use crate::market::MarketCalendar;
use crate::models::card::{AnalysisCard, AnalysisKind};
use crate::models::indicators::{Candle, IndicatorSnapshot};
use crate::models::levels::Levels;
use crate::services::market_data::{IndicatorProvider, IntradayContext, ProviderError};
use crate::signals::{build_factors, classify, rubric_for, score};

const DEFAULT_CANDLE_LOOKBACK: usize = 60;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

pub struct AnalysisPipeline {
    provider: Arc<dyn IndicatorProvider>,
    freshness: FreshnessController,
    atr_period: usize,
    candle_lookback: usize,
}

impl AnalysisPipeline {
    pub fn new(provider: Arc<dyn IndicatorProvider>, freshness: FreshnessController) -> Self {
        Self {
            provider,
            freshness,
            atr_period: DEFAULT_ATR_PERIOD,
            candle_lookback: DEFAULT_CANDLE_LOOKBACK,
        }
    }

    pub fn from_config(
        provider: Arc<dyn IndicatorProvider>,
        store: Arc<dyn CardStore>,
        config: &Config,
    ) -> Self {
        let freshness = FreshnessController::new(
            store,
            MarketCalendar::from_config(&config.market),
            config.freshness,
        );
        Self {
            provider,
            freshness,
            atr_period: config.atr_period,
            candle_lookback: config.candle_lookback.max(config.atr_period + 1),
        }
    }

    pub async fn analyze(&self, symbol: &str, kind: AnalysisKind) -> Result<AnalysisCard, PipelineError> {
        self.analyze_at(symbol, kind, Utc::now()).await
    }

    /// Run the analysis as of `now`. Cache failures degrade to a recompute
    /// (on read) or an unsaved card (on write). Only a missing snapshot is an
    /// error; failed candle or context fetches yield a card that is returned
    /// but not stored, so the next request retries them.
    pub async fn analyze_at(
        &self,
        symbol: &str,
        kind: AnalysisKind,
        now: DateTime<Utc>,
    ) -> Result<AnalysisCard, PipelineError> {
        let freshness_key = match self.freshness.resolve_at(symbol, kind, now).await {
            Ok(Resolution::Hit(card)) => return Ok(card),
            Ok(Resolution::Miss { freshness_key }) => freshness_key,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Card lookup failed, recomputing");
                self.freshness.freshness_key(now)
            }
        };

        let snapshot = self.provider.snapshot(symbol).await?;
        let classification = classify(&snapshot);
        let ctx = CardContext {
            snapshot: &snapshot,
            kind,
            freshness_key: freshness_key.clone(),
            generated_at: now,
            quick_reject_valid_until: Some(self.freshness.quick_reject_valid_until(now)),
        };

        let mut skip_commit = false;
        let card = match classification.scan_type() {
            None => {
                debug!(symbol = %symbol, reason = ?classification.reject_reason(), "Quick reject");
                build_card(&ctx, &classification, None, None)
            }
            Some(scan_type) => {
                let (levels, degraded) = self.compute_levels(symbol, kind, &snapshot).await;
                skip_commit = degraded;
                let rubric = rubric_for(scan_type);
                let factors = build_factors(rubric, &snapshot, levels.as_ref());
                let result = score(&factors, rubric);
                build_card(&ctx, &classification, levels.as_ref(), Some(&result))
            }
        };

        info!(
            symbol = %symbol,
            kind = %kind,
            freshness_key = %freshness_key,
            action = ?card.verdict.action,
            total = card.setup_score.total,
            grade = %card.setup_score.grade,
            "Analysis complete"
        );

        if skip_commit {
            warn!(symbol = %symbol, kind = %kind, "Inputs were incomplete, not storing analysis card");
        } else if let Err(e) = self.freshness.commit(symbol, kind, &freshness_key, &card).await {
            warn!(symbol = %symbol, error = %e, "Failed to store analysis card");
        }

        Ok(card)
    }

    /// `None` when the provider failed; an empty history is `Some(vec![])`.
    async fn load_candles(&self, symbol: &str) -> Option<Vec<Candle>> {
        match self.provider.candles(symbol, self.candle_lookback).await {
            Ok(candles) => Some(ascending(&candles).into_owned()),
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Candles unavailable, continuing without them");
                None
            }
        }
    }

    async fn load_intraday_context(&self, symbol: &str) -> Option<IntradayContext> {
        match self.provider.intraday_context(symbol).await {
            Ok(context) => Some(context),
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Intraday context unavailable, assuming neutral");
                None
            }
        }
    }

    /// Levels for the requested style, plus whether any provider call failed
    /// along the way.
    async fn compute_levels(
        &self,
        symbol: &str,
        kind: AnalysisKind,
        snapshot: &IndicatorSnapshot,
    ) -> (Option<Levels>, bool) {
        let loaded = self.load_candles(symbol).await;
        let mut degraded = loaded.is_none();
        let candles = loaded.unwrap_or_default();
        let atr = calculate_atr(&candles, self.atr_period);

        let levels = match kind {
            AnalysisKind::Swing => calculate_swing_levels(snapshot, &candles, atr).map(Levels::Swing),
            AnalysisKind::Intraday => {
                let (Some(prev_day_candle), Some(atr14)) =
                    (candles.last().cloned(), atr.or_else(|| snapshot.atr_value()))
                else {
                    debug!(symbol = %symbol, "No previous session or ATR for intraday levels");
                    return (None, degraded);
                };
                let context = match self.load_intraday_context(symbol).await {
                    Some(context) => context,
                    None => {
                        degraded = true;
                        IntradayContext::default()
                    }
                };
                calculate_intraday_levels(&IntradayParams {
                    prev_day_candle,
                    atr14,
                    sentiment: context.sentiment,
                    news_impact: context.news_impact,
                    opening_price: context.opening_price,
                })
                .map(Levels::Intraday)
            }
        };

        (levels, degraded)
    }
}
