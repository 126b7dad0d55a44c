//! Subscription Repository Port
//!
//! Read access to billing state. Writes belong to the billing integration.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, UserSubscription};

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Find the subscription record for a user, if any
    async fn find_by_user(&self, user_id: &str) -> Result<Option<UserSubscription>, DomainError>;
}
