//! Category - Response DTO

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use companion::Category;

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}
