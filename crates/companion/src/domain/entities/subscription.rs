//! UserSubscription - Billing state behind the pro gate

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Grace period added to the paid period end before access lapses
pub const SUBSCRIPTION_GRACE_MS: i64 = 86_400_000;

/// Subscription record written by the billing integration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSubscription {
    pub id: Uuid,
    pub user_id: String,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub stripe_price_id: Option<String>,
    pub stripe_current_period_end: Option<DateTime<Utc>>,
}

impl UserSubscription {
    /// A subscription is active while it has a price and the current
    /// period (plus one day of grace) has not ended yet.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        let has_price = self
            .stripe_price_id
            .as_deref()
            .is_some_and(|price| !price.is_empty());

        match self.stripe_current_period_end {
            // A period end too late to extend is still in the future
            Some(period_end) if has_price => period_end
                .checked_add_signed(Duration::milliseconds(SUBSCRIPTION_GRACE_MS))
                .map_or(true, |valid_until| valid_until > now),
            _ => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }
}
