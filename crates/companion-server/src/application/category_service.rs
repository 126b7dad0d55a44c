//! Category Application Service

use std::sync::Arc;

use companion::{Category, CategoryRepository, DomainError};

/// Application service for Category operations
pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    /// All categories, ordered by name
    pub async fn list_all(&self) -> Result<Vec<Category>, DomainError> {
        self.repo.find_all().await
    }
}
