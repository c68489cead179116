//! Environment-driven configuration.

use chrono::{FixedOffset, NaiveDate, NaiveTime, Offset, Utc};
use std::env;
use tracing::warn;

use crate::cache::freshness::{FreshnessPolicy, QuickRejectWindow};
use crate::indicators::volatility::DEFAULT_ATR_PERIOD;

const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;
const DEFAULT_QUICK_REJECT_TTL_MINUTES: i64 = 30;
const DEFAULT_CANDLE_LOOKBACK: usize = 60;

/// Source of raw configuration values, keyed by variable name.
pub trait Lookup: Fn(&str) -> Option<String> {}

impl<F: Fn(&str) -> Option<String>> Lookup for F {}

fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Deployment environment name (`APP_ENV`), defaults to `sandbox`.
pub fn get_environment() -> String {
    environment_from(&process_env)
}

/// Redis connection string, if a Redis-backed card store is configured.
pub fn get_redis_url() -> Option<String> {
    redis_url_from(&process_env)
}

fn environment_from(lookup: &impl Lookup) -> String {
    lookup("APP_ENV").unwrap_or_else(|| "sandbox".to_string())
}

fn redis_url_from(lookup: &impl Lookup) -> Option<String> {
    lookup("REDIS_URL").filter(|url| !url.trim().is_empty())
}

fn parse_value<T: std::str::FromStr>(lookup: &impl Lookup, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key = key, value = %raw, "Ignoring unparseable configuration value");
            None
        }
    }
}

fn parse_time(lookup: &impl Lookup, key: &str) -> Option<NaiveTime> {
    let raw = lookup(key)?;
    match NaiveTime::parse_from_str(raw.trim(), "%H:%M") {
        Ok(time) => Some(time),
        Err(_) => {
            warn!(key = key, value = %raw, "Ignoring unparseable HH:MM time");
            None
        }
    }
}

/// Comma-separated `YYYY-MM-DD` dates; malformed entries are skipped.
pub fn parse_holidays(raw: &str) -> Vec<NaiveDate> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                warn!(value = s, "Ignoring unparseable holiday date");
                None
            }
        })
        .collect()
}

/// `market_hours` or `next_session`; anything else (or nothing) falls back to
/// `next_session`.
pub fn parse_quick_reject_window(raw: Option<&str>, ttl_minutes: i64) -> QuickRejectWindow {
    match raw.map(str::trim) {
        Some("market_hours") => QuickRejectWindow::MarketHours { ttl_minutes },
        Some("next_session") | None => QuickRejectWindow::NextSession,
        Some(other) => {
            warn!(value = other, "Unknown QUICK_REJECT_WINDOW, using next_session");
            QuickRejectWindow::NextSession
        }
    }
}

/// Exchange session definition.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketConfig {
    pub utc_offset_minutes: i32,
    pub open: NaiveTime,
    pub close: NaiveTime,
    pub holidays: Vec<NaiveDate>,
}

impl MarketConfig {
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }

    pub fn from_env() -> Self {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: &impl Lookup) -> Self {
        let defaults = Self::default();
        Self {
            utc_offset_minutes: parse_value(lookup, "MARKET_UTC_OFFSET_MINUTES")
                .filter(|m: &i32| m.abs() < 24 * 60)
                .unwrap_or(defaults.utc_offset_minutes),
            open: parse_time(lookup, "MARKET_OPEN").unwrap_or(defaults.open),
            close: parse_time(lookup, "MARKET_CLOSE").unwrap_or(defaults.close),
            holidays: lookup("MARKET_HOLIDAYS")
                .map(|raw| parse_holidays(&raw))
                .unwrap_or_default(),
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            open: NaiveTime::from_hms_opt(9, 15, 0).unwrap_or(NaiveTime::MIN),
            close: NaiveTime::from_hms_opt(15, 30, 0).unwrap_or(NaiveTime::MIN),
            holidays: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub redis_url: Option<String>,
    pub market: MarketConfig,
    pub freshness: FreshnessPolicy,
    pub atr_period: usize,
    pub candle_lookback: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(&process_env)
    }

    /// Build from any key/value source, e.g. a map in tests.
    pub fn from_lookup(lookup: &impl Lookup) -> Self {
        let ttl_minutes = parse_value(lookup, "QUICK_REJECT_TTL_MINUTES")
            .filter(|m: &i64| *m > 0)
            .unwrap_or(DEFAULT_QUICK_REJECT_TTL_MINUTES);
        let quick_reject = parse_quick_reject_window(lookup("QUICK_REJECT_WINDOW").as_deref(), ttl_minutes);

        let atr_period = parse_value(lookup, "ATR_PERIOD")
            .filter(|p: &usize| *p > 0)
            .unwrap_or(DEFAULT_ATR_PERIOD);
        let candle_lookback = parse_value(lookup, "CANDLE_LOOKBACK")
            .filter(|n: &usize| *n > atr_period)
            .unwrap_or(DEFAULT_CANDLE_LOOKBACK.max(atr_period + 1));

        Self {
            environment: environment_from(lookup),
            redis_url: redis_url_from(lookup),
            market: MarketConfig::from_lookup(lookup),
            freshness: FreshnessPolicy { quick_reject },
            atr_period,
            candle_lookback,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "production" | "prod")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            redis_url: None,
            market: MarketConfig::default(),
            freshness: FreshnessPolicy::default(),
            atr_period: DEFAULT_ATR_PERIOD,
            candle_lookback: DEFAULT_CANDLE_LOOKBACK,
        }
    }
}
