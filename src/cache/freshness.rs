//! Decides whether a stored card is still authoritative.
//!
//! Cards are keyed by the last completed session (the freshness key). A full
//! setup card is valid for as long as that key is current. A quick reject can
//! flip intraday, so it also carries an expiry chosen by the policy.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info};

use super::{CacheError, CardKey, CardStore};
use crate::market::MarketCalendar;
use crate::models::card::{AnalysisCard, AnalysisKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuickRejectWindow {
    /// Valid until the next session opens.
    #[default]
    NextSession,
    /// While the market is open, valid for `ttl_minutes` (never past the
    /// close); otherwise until the next session opens.
    MarketHours { ttl_minutes: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FreshnessPolicy {
    pub quick_reject: QuickRejectWindow,
}

impl FreshnessPolicy {
    pub fn quick_reject_valid_until(&self, calendar: &MarketCalendar, now: DateTime<Utc>) -> DateTime<Utc> {
        match self.quick_reject {
            QuickRejectWindow::NextSession => calendar.calculate_valid_until(now),
            QuickRejectWindow::MarketHours { ttl_minutes } => match calendar.session_close(now) {
                Some(close) => (now + Duration::minutes(ttl_minutes.max(1))).min(close),
                None => calendar.calculate_valid_until(now),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Hit(AnalysisCard),
    Miss { freshness_key: String },
}

pub struct FreshnessController {
    store: Arc<dyn CardStore>,
    calendar: MarketCalendar,
    policy: FreshnessPolicy,
}

impl FreshnessController {
    pub fn new(store: Arc<dyn CardStore>, calendar: MarketCalendar, policy: FreshnessPolicy) -> Self {
        Self {
            store,
            calendar,
            policy,
        }
    }

    pub fn freshness_key(&self, now: DateTime<Utc>) -> String {
        self.calendar.freshness_key(now)
    }

    /// Expiry for a quick reject generated at `now`.
    pub fn quick_reject_valid_until(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.policy.quick_reject_valid_until(&self.calendar, now)
    }

    pub async fn resolve(&self, instrument: &str, kind: AnalysisKind) -> Result<Resolution, CacheError> {
        self.resolve_at(instrument, kind, Utc::now()).await
    }

    pub async fn resolve_at(
        &self,
        instrument: &str,
        kind: AnalysisKind,
        now: DateTime<Utc>,
    ) -> Result<Resolution, CacheError> {
        let freshness_key = self.calendar.freshness_key(now);
        let key = CardKey::new(instrument, kind, &freshness_key);

        match self.store.get(&key).await? {
            Some(card) if card.is_quick_reject() && card.valid_until.map_or(true, |until| now >= until) => {
                debug!(
                    instrument = %key.instrument,
                    kind = %kind,
                    freshness_key = %freshness_key,
                    "Quick reject expired, recomputing"
                );
                Ok(Resolution::Miss { freshness_key })
            }
            Some(card) => {
                debug!(instrument = %key.instrument, kind = %kind, freshness_key = %freshness_key, "Card cache hit");
                Ok(Resolution::Hit(card))
            }
            None => {
                debug!(instrument = %key.instrument, kind = %kind, freshness_key = %freshness_key, "Card cache miss");
                Ok(Resolution::Miss { freshness_key })
            }
        }
    }

    pub async fn commit(
        &self,
        instrument: &str,
        kind: AnalysisKind,
        freshness_key: &str,
        card: &AnalysisCard,
    ) -> Result<(), CacheError> {
        let key = CardKey::new(instrument, kind, freshness_key);
        self.store.upsert(&key, card).await?;
        info!(
            instrument = %key.instrument,
            kind = %kind,
            freshness_key = %freshness_key,
            action = ?card.verdict.action,
            "Committed analysis card"
        );
        Ok(())
    }
}
