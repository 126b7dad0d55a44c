//! Companion - Request/Response DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use companion::{Companion, CompanionFields, CompanionFilter};

/// Companion as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanionResponse {
    pub id: Uuid,
    pub user_id: String,
    pub user_name: String,
    pub category_id: Uuid,
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub seed: String,
    pub src: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Companion> for CompanionResponse {
    fn from(companion: Companion) -> Self {
        Self {
            id: companion.id,
            user_id: companion.user_id,
            user_name: companion.user_name,
            category_id: companion.category_id,
            name: companion.name,
            description: companion.description,
            instructions: companion.instructions,
            seed: companion.seed,
            src: companion.src,
            created_at: companion.created_at,
            updated_at: companion.updated_at,
        }
    }
}

/// Create / update Companion request.
///
/// Every field is required; absent fields are reported together as
/// "Missing required fields" rather than as a body parse error.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanionRequest {
    /// Hosted image URL
    pub src: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub instructions: Option<String>,
    /// Example conversation; a string or a number
    #[schema(value_type = Option<String>)]
    pub seed: Option<serde_json::Value>,
    pub category_id: Option<String>,
}

impl From<CompanionRequest> for CompanionFields {
    fn from(request: CompanionRequest) -> Self {
        Self {
            src: request.src,
            name: request.name,
            description: request.description,
            instructions: request.instructions,
            seed: request.seed,
            category_id: request.category_id,
        }
    }
}

/// Companion search query (`?name=&categoryId=`)
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CompanionQuery {
    /// Case-insensitive substring of the companion name
    pub name: Option<String>,
    /// Category to restrict to
    pub category_id: Option<String>,
}

impl From<&CompanionQuery> for CompanionFilter {
    fn from(query: &CompanionQuery) -> Self {
        CompanionFilter::from_query(query.name.as_deref(), query.category_id.as_deref())
    }
}
