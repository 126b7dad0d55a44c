//! PostgreSQL implementation of SubscriptionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use companion::{DomainError, SubscriptionRepository, UserSubscription};

use super::repository_error;

pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserSubscriptionRow {
    id: Uuid,
    user_id: String,
    stripe_customer_id: Option<String>,
    stripe_subscription_id: Option<String>,
    stripe_price_id: Option<String>,
    stripe_current_period_end: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<UserSubscriptionRow> for UserSubscription {
    fn from(row: UserSubscriptionRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            stripe_customer_id: row.stripe_customer_id,
            stripe_subscription_id: row.stripe_subscription_id,
            stripe_price_id: row.stripe_price_id,
            stripe_current_period_end: row.stripe_current_period_end,
        }
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<UserSubscription>, DomainError> {
        let row = sqlx::query_as::<_, UserSubscriptionRow>(
            "SELECT * FROM user_subscriptions WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(row.map(Into::into))
    }
}
