use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use setup_engine::cache::{
    CacheError, CardKey, CardStore, FreshnessController, FreshnessPolicy, InMemoryCardStore,
};
use setup_engine::core::AnalysisPipeline;
use setup_engine::market::MarketCalendar;
use setup_engine::models::card::AnalysisCard;
use setup_engine::models::indicators::{Candle, IndicatorSnapshot};
use setup_engine::services::market_data::{
    IndicatorProvider, IntradayContext, ProviderError, StaticIndicatorProvider,
};

/// Wall-clock time at the exchange (UTC+05:30).
pub fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    FixedOffset::east_opt(330 * 60)
        .unwrap()
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
        .with_timezone(&Utc)
}

/// Thirty daily bars climbing 0.5 a day with a constant 2.0 range, so ATR(14)
/// is exactly 2.0 and the last close is 114.5.
pub fn create_daily_candles() -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2023, 11, 20, 10, 0, 0).unwrap();
    (0..30)
        .map(|i| {
            let close = 100.0 + i as f64 * 0.5;
            Candle::new(close - 0.2, close + 1.0, close - 1.0, close, 50_000.0, start + Duration::days(i))
        })
        .collect()
}

/// Momentum setup: above every average, RSI 60, well short of the 52-week high.
pub fn momentum_snapshot() -> IndicatorSnapshot {
    let mut snapshot = IndicatorSnapshot::new("INFY", 115.0)
        .with_moving_averages(112.0, 108.0, 100.0)
        .with_rsi(60.0, 62.0)
        .with_high_52w(140.0)
        .with_daily_pivots(118.0, 113.0)
        .with_weekly_pivots(122.0, 110.0)
        .with_volume_vs_avg(1.6)
        .with_atr_pct(1.8);
    snapshot.weekly_change_pct = Some(3.0);
    snapshot.relative_strength = Some(6.0);
    snapshot.institutional_score = Some(70.0);
    snapshot
}

/// Trades under its 200-day SMA.
pub fn rejected_snapshot() -> IndicatorSnapshot {
    let mut snapshot = IndicatorSnapshot::new("TATAMOTORS", 90.0).with_rsi(48.0, 50.0);
    snapshot.sma200 = Some(100.0);
    snapshot.daily_s1 = Some(88.0);
    snapshot
}

pub fn default_provider() -> StaticIndicatorProvider {
    StaticIndicatorProvider::new()
        .with_snapshot(momentum_snapshot(), create_daily_candles())
        .with_snapshot(rejected_snapshot(), create_daily_candles())
}

/// Pipeline over an in-memory store; the store handle is returned for inspection.
pub fn create_pipeline(provider: impl IndicatorProvider + 'static) -> (AnalysisPipeline, Arc<InMemoryCardStore>) {
    let store = Arc::new(InMemoryCardStore::new());
    let freshness = FreshnessController::new(store.clone(), MarketCalendar::default(), FreshnessPolicy::default());
    (AnalysisPipeline::new(Arc::new(provider), freshness), store)
}

/// Store whose every operation fails.
pub struct BrokenStore;

fn broken() -> CacheError {
    CacheError::Serialization(serde_json::from_str::<u32>("not json").unwrap_err())
}

#[async_trait]
impl CardStore for BrokenStore {
    async fn get(&self, _key: &CardKey) -> Result<Option<AnalysisCard>, CacheError> {
        Err(broken())
    }

    async fn upsert(&self, _key: &CardKey, _card: &AnalysisCard) -> Result<(), CacheError> {
        Err(broken())
    }
}

/// Wraps fixture data and fails the first `candle_failures` candle fetches and
/// the first `context_failures` intraday context fetches.
pub struct FlakyProvider {
    inner: StaticIndicatorProvider,
    candle_failures: AtomicUsize,
    context_failures: AtomicUsize,
}

impl FlakyProvider {
    pub fn new(inner: StaticIndicatorProvider, candle_failures: usize, context_failures: usize) -> Self {
        Self {
            inner,
            candle_failures: AtomicUsize::new(candle_failures),
            context_failures: AtomicUsize::new(context_failures),
        }
    }
}

fn take_failure(remaining: &AtomicUsize) -> bool {
    remaining
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

#[async_trait]
impl IndicatorProvider for FlakyProvider {
    async fn snapshot(&self, symbol: &str) -> Result<IndicatorSnapshot, ProviderError> {
        self.inner.snapshot(symbol).await
    }

    async fn candles(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, ProviderError> {
        if take_failure(&self.candle_failures) {
            return Err(ProviderError::Unavailable("candle feed timed out".to_string()));
        }
        self.inner.candles(symbol, limit).await
    }

    async fn intraday_context(&self, symbol: &str) -> Result<IntradayContext, ProviderError> {
        if take_failure(&self.context_failures) {
            return Err(ProviderError::Unavailable("news feed timed out".to_string()));
        }
        self.inner.intraday_context(symbol).await
    }
}
