//! Companion Repository Port
//!
//! Abstract interface for Companion persistence operations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Companion, CompanionFilter};

/// Repository interface for Companion entities
#[async_trait]
pub trait CompanionRepository: Send + Sync {
    /// Find a Companion by ID regardless of owner
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Companion>, DomainError>;

    /// Find a Companion by ID only if `user_id` owns it
    async fn find_for_user(
        &self,
        id: Uuid,
        user_id: &str,
    ) -> Result<Option<Companion>, DomainError>;

    /// Search Companions, newest first
    async fn search(&self, filter: &CompanionFilter) -> Result<Vec<Companion>, DomainError>;

    /// Insert a new Companion
    async fn insert(&self, companion: &Companion) -> Result<Companion, DomainError>;

    /// Overwrite a Companion owned by `companion.user_id`.
    ///
    /// Fails with `NotFound` when no row matches both id and owner.
    async fn update(&self, companion: &Companion) -> Result<Companion, DomainError>;

    /// Delete a Companion owned by `user_id`; `false` when nothing matched
    async fn delete_for_user(&self, id: Uuid, user_id: &str) -> Result<bool, DomainError>;
}
