//! End-to-end analysis runs against fixture data

use std::sync::Arc;

use setup_engine::cache::{FreshnessController, FreshnessPolicy};
use setup_engine::core::{AnalysisPipeline, PipelineError};
use setup_engine::market::MarketCalendar;
use setup_engine::models::card::{Action, AnalysisKind, Confidence};
use setup_engine::models::classification::{RejectReason, ScanType};
use setup_engine::models::levels::{Direction, IntradayLevels, Levels, Sentiment};
use setup_engine::models::score::Grade;
use setup_engine::services::market_data::{IntradayContext, ProviderError, StaticIndicatorProvider};

use crate::test_utils::{
    create_daily_candles, create_pipeline, default_provider, local, momentum_snapshot, BrokenStore,
    FlakyProvider,
};

#[tokio::test]
async fn test_momentum_swing_card() {
    let (pipeline, store) = create_pipeline(default_provider());
    let now = local(2024, 1, 5, 16, 0);

    let card = pipeline.analyze_at("INFY", AnalysisKind::Swing, now).await.unwrap();

    assert_eq!(card.symbol, "INFY");
    assert_eq!(card.kind, AnalysisKind::Swing);
    assert_eq!(card.freshness_key, "2024-01-05");
    assert_eq!(card.generated_at, now);
    assert!(card.valid_until.is_none());

    let plan = card.trading_plan().expect("full card");
    assert_eq!(plan.scan_type, ScanType::Momentum);
    let Some(Levels::Swing(levels)) = plan.levels.as_ref() else {
        panic!("expected swing levels, got {:?}", plan.levels);
    };
    assert_eq!(levels.stop_loss, 112.5);
    assert_eq!(levels.target_1, 118.0);
    assert_eq!(levels.risk_reward, 1.2);

    assert_eq!(card.setup_score.total, 67);
    assert_eq!(card.setup_score.grade, Grade::BPlus);
    assert_eq!(card.verdict.action, Action::Buy);
    assert_eq!(card.verdict.confidence, Confidence::Medium);

    let codes: Vec<&str> = card.warnings.iter().map(|w| w.code.as_str()).collect();
    assert_eq!(codes, vec!["poor_risk_reward"]);

    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_same_session_returns_stored_card() {
    let (pipeline, store) = create_pipeline(default_provider());

    let first = pipeline
        .analyze_at("INFY", AnalysisKind::Swing, local(2024, 1, 5, 16, 0))
        .await
        .unwrap();
    let second = pipeline
        .analyze_at("infy", AnalysisKind::Swing, local(2024, 1, 6, 12, 0))
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_new_session_keeps_history() {
    let (pipeline, store) = create_pipeline(default_provider());

    pipeline
        .analyze_at("INFY", AnalysisKind::Swing, local(2024, 1, 5, 16, 0))
        .await
        .unwrap();
    let monday = pipeline
        .analyze_at("INFY", AnalysisKind::Swing, local(2024, 1, 8, 16, 0))
        .await
        .unwrap();

    assert_eq!(monday.freshness_key, "2024-01-08");
    let history = store.history("INFY", AnalysisKind::Swing).await;
    let keys: Vec<&str> = history.iter().map(|c| c.freshness_key.as_str()).collect();
    assert_eq!(keys, vec!["2024-01-05", "2024-01-08"]);
}

#[tokio::test]
async fn test_quick_reject_expires_at_next_open() {
    let (pipeline, store) = create_pipeline(default_provider());
    let friday = local(2024, 1, 5, 16, 0);

    let card = pipeline
        .analyze_at("TATAMOTORS", AnalysisKind::Swing, friday)
        .await
        .unwrap();
    assert!(card.is_quick_reject());
    assert_eq!(card.verdict.action, Action::NoTrade);
    assert_eq!(card.quick_reject().unwrap().reason, RejectReason::Below200Sma);
    assert_eq!(card.valid_until, Some(local(2024, 1, 8, 9, 15)));

    // Weekend: still valid.
    let weekend = pipeline
        .analyze_at("TATAMOTORS", AnalysisKind::Swing, local(2024, 1, 6, 12, 0))
        .await
        .unwrap();
    assert_eq!(weekend.generated_at, friday);

    // Monday session: same freshness key, but the quick reject has lapsed.
    let monday = local(2024, 1, 8, 10, 0);
    let refreshed = pipeline
        .analyze_at("TATAMOTORS", AnalysisKind::Swing, monday)
        .await
        .unwrap();
    assert_eq!(refreshed.generated_at, monday);
    assert_eq!(refreshed.freshness_key, "2024-01-05");
    assert_eq!(refreshed.valid_until, Some(local(2024, 1, 9, 9, 15)));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_intraday_plan_from_previous_session() {
    let provider = default_provider().with_intraday_context(
        "INFY",
        IntradayContext {
            sentiment: Sentiment::Bullish,
            news_impact: None,
            opening_price: Some(114.8),
        },
    );
    let (pipeline, store) = create_pipeline(provider);
    let now = local(2024, 1, 5, 16, 0);

    let card = pipeline.analyze_at("INFY", AnalysisKind::Intraday, now).await.unwrap();
    let plan = card.trading_plan().unwrap();
    let Some(Levels::Intraday(IntradayLevels::Buy(levels))) = plan.levels.as_ref() else {
        panic!("expected intraday BUY levels, got {:?}", plan.levels);
    };
    assert_eq!(levels.entry, 114.5);
    assert_eq!(levels.stop_loss, 112.5);
    assert_eq!(levels.target_1, 116.9);
    assert_eq!(levels.basis.atr, 2.0);

    pipeline.analyze_at("INFY", AnalysisKind::Swing, now).await.unwrap();
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn test_neutral_intraday_waits() {
    let (pipeline, _store) = create_pipeline(default_provider());
    let card = pipeline
        .analyze_at("INFY", AnalysisKind::Intraday, local(2024, 1, 5, 16, 0))
        .await
        .unwrap();

    let levels = card.trading_plan().and_then(|p| p.levels.as_ref()).unwrap();
    assert_eq!(levels.direction(), Direction::Neutral);
    assert_eq!(card.verdict.action, Action::Wait);
    assert_eq!(card.verdict.confidence, Confidence::Low);
}

#[tokio::test]
async fn test_intraday_without_candles_waits() {
    let provider = StaticIndicatorProvider::new().with_snapshot(momentum_snapshot(), Vec::new());
    let (pipeline, _store) = create_pipeline(provider);

    let card = pipeline
        .analyze_at("INFY", AnalysisKind::Intraday, local(2024, 1, 5, 16, 0))
        .await
        .unwrap();
    assert!(card.trading_plan().unwrap().levels.is_none());
    assert_eq!(card.verdict.action, Action::Wait);

    // Swing still has the snapshot's pivots and ATR to work with.
    let swing = pipeline
        .analyze_at("INFY", AnalysisKind::Swing, local(2024, 1, 5, 16, 0))
        .await
        .unwrap();
    assert!(swing.trading_plan().unwrap().levels.is_some());
}

#[tokio::test]
async fn test_failed_candle_fetch_is_retried() {
    let (pipeline, store) = create_pipeline(FlakyProvider::new(default_provider(), 1, 0));
    let first_at = local(2024, 1, 5, 16, 0);

    let first = pipeline
        .analyze_at("INFY", AnalysisKind::Intraday, first_at)
        .await
        .unwrap();
    assert!(first.trading_plan().unwrap().levels.is_none());
    assert_eq!(first.verdict.action, Action::Wait);
    assert!(store.is_empty().await);

    let later = local(2024, 1, 5, 17, 0);
    let second = pipeline
        .analyze_at("INFY", AnalysisKind::Intraday, later)
        .await
        .unwrap();
    assert_eq!(second.generated_at, later);
    assert!(second.trading_plan().unwrap().levels.is_some());
    assert_eq!(store.len().await, 1);

    // Complete inputs are cached as usual.
    let third = pipeline
        .analyze_at("INFY", AnalysisKind::Intraday, local(2024, 1, 5, 18, 0))
        .await
        .unwrap();
    assert_eq!(third, second);
}

#[tokio::test]
async fn test_failed_intraday_context_falls_back_to_neutral() {
    let provider = default_provider().with_intraday_context(
        "INFY",
        IntradayContext {
            sentiment: Sentiment::Bullish,
            news_impact: None,
            opening_price: Some(114.8),
        },
    );
    let (pipeline, store) = create_pipeline(FlakyProvider::new(provider, 0, 1));

    let first = pipeline
        .analyze_at("INFY", AnalysisKind::Intraday, local(2024, 1, 5, 16, 0))
        .await
        .unwrap();
    let levels = first.trading_plan().and_then(|p| p.levels.as_ref()).unwrap();
    assert_eq!(levels.direction(), Direction::Neutral);
    assert_eq!(first.verdict.action, Action::Wait);
    assert!(store.is_empty().await);

    let second = pipeline
        .analyze_at("INFY", AnalysisKind::Intraday, local(2024, 1, 5, 16, 30))
        .await
        .unwrap();
    let levels = second.trading_plan().and_then(|p| p.levels.as_ref()).unwrap();
    assert_eq!(levels.direction(), Direction::Buy);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_unknown_symbol_is_an_error() {
    let (pipeline, store) = create_pipeline(default_provider());
    let result = pipeline
        .analyze_at("NOPE", AnalysisKind::Swing, local(2024, 1, 5, 16, 0))
        .await;

    assert!(matches!(
        result,
        Err(PipelineError::Provider(ProviderError::NotFound { .. }))
    ));
    assert!(store.is_empty().await);
}

#[test]
fn test_store_failures_do_not_block_analysis() {
    let provider = StaticIndicatorProvider::new().with_snapshot(momentum_snapshot(), create_daily_candles());
    let freshness = FreshnessController::new(
        Arc::new(BrokenStore),
        MarketCalendar::default(),
        FreshnessPolicy::default(),
    );
    let pipeline = AnalysisPipeline::new(Arc::new(provider), freshness);

    let card = tokio_test::block_on(pipeline.analyze_at("INFY", AnalysisKind::Swing, local(2024, 1, 5, 16, 0)))
        .unwrap();
    assert_eq!(card.freshness_key, "2024-01-05");
    assert_eq!(card.verdict.action, Action::Buy);
}
