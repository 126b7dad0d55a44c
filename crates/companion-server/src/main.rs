use axum::{routing::get, Json, Router};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod auth;
mod config;
mod error;
mod models;
mod routes;
#[cfg(test)]
mod test_support;

use adapters::{
    CloudinaryImageHost, PgCategoryRepository, PgCompanionRepository, PgSubscriptionRepository,
};
use application::{CategoryService, CompanionService};
use auth::SessionVerifier;
use config::AppConfig;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub companion_service: Arc<CompanionService>,
    pub category_service: Arc<CategoryService>,
    pub sessions: Arc<SessionVerifier>,
}

#[derive(Serialize, ToSchema)]
pub struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthCheck)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Companion API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the full router with shared state
pub fn build_router(state: AppState) -> Router {
    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::companion::router())
        .merge(routes::category::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("Companion API initializing...");

    let config = AppConfig::from_lookup(|key| secrets.get(key));

    let sessions = SessionVerifier::new(config.session_key.as_ref())?;
    if sessions.is_enabled() {
        tracing::info!("🔐 Session verification enabled");
    } else {
        tracing::warn!("⚠️  No SESSION_JWT_* secret set - every caller is anonymous");
    }

    // Run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("✅ Database migrations completed");

    // Initialize application services
    let companion_repo = Arc::new(PgCompanionRepository::new(pool.clone()));
    let subscription_repo = Arc::new(PgSubscriptionRepository::new(pool.clone()));
    let category_repo = Arc::new(PgCategoryRepository::new(pool));

    let mut companion_service = CompanionService::new(companion_repo, subscription_repo);

    match config.cloudinary {
        Some(cloudinary) => match CloudinaryImageHost::new(cloudinary) {
            Ok(host) => {
                let folder = host.upload_folder().map(str::to_string);
                tracing::info!(folder = ?folder, "🖼️  Cloudinary image cleanup enabled");
                companion_service = companion_service.with_image_host(Arc::new(host), folder);
            }
            Err(e) => {
                tracing::warn!("⚠️  Failed to initialize Cloudinary: {}", e);
            }
        },
        None => {
            tracing::warn!("⚠️  No CLOUDINARY_* secrets set - image cleanup disabled");
        }
    }

    let state = AppState {
        companion_service: Arc::new(companion_service),
        category_service: Arc::new(CategoryService::new(category_repo)),
        sessions: Arc::new(sessions),
    };

    let router = build_router(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Companion API ready");

    Ok(router.into())
}
