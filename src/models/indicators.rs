use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Classic floor-trader pivot levels derived from a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotSet {
    pub pivot: f64,
    pub r1: f64,
    pub r2: f64,
    pub s1: f64,
    pub s2: f64,
}

/// Pre-computed indicator readings for one instrument at one point in time.
///
/// Every reading is optional. An absent reading disables the checks that
/// depend on it and never fails a computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub symbol: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub ema20: Option<f64>,
    #[serde(default)]
    pub ema50: Option<f64>,
    #[serde(default)]
    pub sma200: Option<f64>,
    /// Daily RSI(14).
    #[serde(default)]
    pub rsi: Option<f64>,
    #[serde(default)]
    pub weekly_rsi: Option<f64>,
    #[serde(default)]
    pub high_52w: Option<f64>,
    #[serde(default)]
    pub todays_low: Option<f64>,
    #[serde(default)]
    pub daily_r1: Option<f64>,
    #[serde(default)]
    pub daily_s1: Option<f64>,
    #[serde(default)]
    pub weekly_r1: Option<f64>,
    #[serde(default)]
    pub weekly_s1: Option<f64>,
    /// Today's volume as a multiple of the average volume.
    #[serde(default)]
    pub volume_vs_avg: Option<f64>,
    /// ATR as a percentage of price.
    #[serde(default)]
    pub atr_pct: Option<f64>,
    /// Absolute ATR(14), when the provider already has it.
    #[serde(default)]
    pub atr: Option<f64>,
    #[serde(default)]
    pub weekly_change_pct: Option<f64>,
    /// Relative strength versus the benchmark index, in percent.
    #[serde(default)]
    pub relative_strength: Option<f64>,
    /// Fundamentals / institutional holding quality on a 0-100 scale.
    #[serde(default)]
    pub institutional_score: Option<f64>,
}

impl IndicatorSnapshot {
    pub fn new(symbol: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            price: Some(price),
            ..Self::default()
        }
    }

    pub fn with_moving_averages(mut self, ema20: f64, ema50: f64, sma200: f64) -> Self {
        self.ema20 = Some(ema20);
        self.ema50 = Some(ema50);
        self.sma200 = Some(sma200);
        self
    }

    pub fn with_rsi(mut self, daily: f64, weekly: f64) -> Self {
        self.rsi = Some(daily);
        self.weekly_rsi = Some(weekly);
        self
    }

    pub fn with_high_52w(mut self, high_52w: f64) -> Self {
        self.high_52w = Some(high_52w);
        self
    }

    pub fn with_daily_pivots(mut self, r1: f64, s1: f64) -> Self {
        self.daily_r1 = Some(r1);
        self.daily_s1 = Some(s1);
        self
    }

    pub fn with_weekly_pivots(mut self, r1: f64, s1: f64) -> Self {
        self.weekly_r1 = Some(r1);
        self.weekly_s1 = Some(s1);
        self
    }

    pub fn with_volume_vs_avg(mut self, ratio: f64) -> Self {
        self.volume_vs_avg = Some(ratio);
        self
    }

    pub fn with_atr_pct(mut self, atr_pct: f64) -> Self {
        self.atr_pct = Some(atr_pct);
        self
    }

    /// Absolute ATR: the provider's value, else derived from `atr_pct`.
    pub fn atr_value(&self) -> Option<f64> {
        if let Some(atr) = self.atr.filter(|a| a.is_finite() && *a > 0.0) {
            return Some(atr);
        }
        match (self.price, self.atr_pct) {
            (Some(price), Some(pct)) if price > 0.0 && pct.is_finite() && pct > 0.0 => {
                Some(price * pct / 100.0)
            }
            _ => None,
        }
    }
}
