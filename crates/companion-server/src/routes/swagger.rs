//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{CategoryResponse, CompanionRequest, CompanionResponse};
use crate::HealthCheck;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health_check,
        // Companion endpoints
        super::companion::list_companions,
        super::companion::create_companion,
        super::companion::get_companion,
        super::companion::update_companion,
        super::companion::delete_companion,
        // Category endpoints
        super::category::list_categories,
    ),
    info(
        title = "Companion API",
        version = "0.1.0",
        description = "Create, edit and browse AI companion personas.\n\nWrites need a session token; editing needs an active Pro subscription.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Companion", description = "Companion personas"),
        (name = "Category", description = "Companion categories"),
    ),
    components(
        schemas(
            HealthCheck,
            CompanionResponse,
            CompanionRequest,
            CategoryResponse,
        )
    ),
)]
pub struct ApiDoc;
