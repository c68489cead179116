//! Trading-session arithmetic for a single exchange on a fixed UTC offset.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};
use std::collections::BTreeSet;

use crate::config::MarketConfig;

#[derive(Debug, Clone)]
pub struct MarketCalendar {
    offset: FixedOffset,
    open: NaiveTime,
    close: NaiveTime,
    holidays: BTreeSet<NaiveDate>,
}

impl MarketCalendar {
    pub fn new(offset: FixedOffset, open: NaiveTime, close: NaiveTime) -> Self {
        Self {
            offset,
            open,
            close,
            holidays: BTreeSet::new(),
        }
    }

    pub fn from_config(config: &MarketConfig) -> Self {
        Self {
            offset: config.offset(),
            open: config.open,
            close: config.close,
            holidays: config.holidays.iter().copied().collect(),
        }
    }

    pub fn with_holidays(mut self, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.holidays.extend(holidays);
        self
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn is_trading_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.holidays.contains(&date)
    }

    fn local(&self, at: DateTime<Utc>) -> NaiveDateTime {
        at.with_timezone(&self.offset).naive_local()
    }

    fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        let utc = local - Duration::seconds(i64::from(self.offset.local_minus_utc()));
        DateTime::from_naive_utc_and_offset(utc, Utc)
    }

    fn next_trading_day(&self, mut date: NaiveDate) -> NaiveDate {
        while !self.is_trading_day(date) {
            date = date.succ_opt().unwrap_or(date);
            if date == NaiveDate::MAX {
                break;
            }
        }
        date
    }

    fn previous_trading_day(&self, mut date: NaiveDate) -> NaiveDate {
        while !self.is_trading_day(date) {
            date = date.pred_opt().unwrap_or(date);
            if date == NaiveDate::MIN {
                break;
            }
        }
        date
    }

    /// Next session open strictly after `from`. At or past today's open boundary
    /// rolls to tomorrow before skipping non-trading days.
    pub fn next_market_open(&self, from: DateTime<Utc>) -> DateTime<Utc> {
        let local = self.local(from);
        let mut date = local.date();
        if local.time() >= self.open {
            date = date.succ_opt().unwrap_or(date);
        }
        let date = self.next_trading_day(date);
        self.to_utc(date.and_time(self.open))
    }

    /// Validity boundary for results computed at `reference`.
    pub fn calculate_valid_until(&self, reference: DateTime<Utc>) -> DateTime<Utc> {
        self.next_market_open(reference)
    }

    pub fn is_market_open(&self, now: DateTime<Utc>) -> bool {
        let local = self.local(now);
        self.is_trading_day(local.date()) && local.time() >= self.open && local.time() < self.close
    }

    /// Close of the session in progress at `now`, if any.
    pub fn session_close(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if !self.is_market_open(now) {
            return None;
        }
        Some(self.to_utc(self.local(now).date().and_time(self.close)))
    }

    /// Date of the most recent session whose close has already happened.
    pub fn last_completed_session(&self, now: DateTime<Utc>) -> NaiveDate {
        let local = self.local(now);
        let today = local.date();
        if self.is_trading_day(today) && local.time() >= self.close {
            return today;
        }
        self.previous_trading_day(today.pred_opt().unwrap_or(today))
    }

    /// Identifier of the closing data that is authoritative at `now`.
    pub fn freshness_key(&self, now: DateTime<Utc>) -> String {
        self.last_completed_session(now).format("%Y-%m-%d").to_string()
    }
}

impl Default for MarketCalendar {
    fn default() -> Self {
        Self::from_config(&MarketConfig::default())
    }
}
