//! Setup Analyzer
//!
//! Runs one analysis over a JSON fixture and prints the resulting card.
//!
//! Usage: analyzer <snapshot.json> [swing|intraday]

use dotenvy::dotenv;
use serde::Deserialize;
use setup_engine::cache::{CardStore, InMemoryCardStore, RedisCardStore};
use setup_engine::config::Config;
use setup_engine::core::AnalysisPipeline;
use setup_engine::logging;
use setup_engine::models::card::AnalysisKind;
use setup_engine::models::indicators::{Candle, IndicatorSnapshot};
use setup_engine::models::levels::{NewsImpact, Sentiment};
use setup_engine::services::market_data::{IntradayContext, StaticIndicatorProvider};
use std::env;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct IntradayFixture {
    #[serde(default = "neutral")]
    sentiment: Sentiment,
    #[serde(default)]
    news_impact: Option<NewsImpact>,
    #[serde(default)]
    opening_price: Option<f64>,
}

fn neutral() -> Sentiment {
    Sentiment::Neutral
}

#[derive(Debug, Deserialize)]
struct Fixture {
    snapshot: IndicatorSnapshot,
    #[serde(default)]
    candles: Vec<Candle>,
    #[serde(default)]
    intraday: Option<IntradayFixture>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let mut args = env::args().skip(1);
    let path = args
        .next()
        .ok_or("usage: analyzer <snapshot.json> [swing|intraday]")?;
    let kind: AnalysisKind = match args.next() {
        Some(raw) => raw.parse()?,
        None => AnalysisKind::Swing,
    };

    let config = Config::from_env();
    info!(environment = %config.environment, kind = %kind, "Starting analyzer");

    let fixture: Fixture = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    let symbol = fixture.snapshot.symbol.clone();

    let mut provider = StaticIndicatorProvider::new().with_snapshot(fixture.snapshot, fixture.candles);
    if let Some(intraday) = fixture.intraday {
        provider = provider.with_intraday_context(
            &symbol,
            IntradayContext {
                sentiment: intraday.sentiment,
                news_impact: intraday.news_impact,
                opening_price: intraday.opening_price,
            },
        );
    }

    let store: Arc<dyn CardStore> = match config.redis_url.as_deref() {
        Some(url) => match RedisCardStore::new(url).await {
            Ok(store) => {
                info!("Redis card store connected");
                Arc::new(store)
            }
            Err(e) => {
                warn!(error = %e, "Redis unavailable, using in-memory card store");
                Arc::new(InMemoryCardStore::new())
            }
        },
        None => Arc::new(InMemoryCardStore::new()),
    };

    let pipeline = AnalysisPipeline::from_config(Arc::new(provider), store, &config);
    let card = pipeline.analyze(&symbol, kind).await?;

    println!("{}", serde_json::to_string_pretty(&card)?);
    Ok(())
}
