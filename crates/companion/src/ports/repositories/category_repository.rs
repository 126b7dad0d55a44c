//! Category Repository Port

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Category};

/// Repository interface for Category entities
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find all Categories ordered by name
    async fn find_all(&self) -> Result<Vec<Category>, DomainError>;
}
