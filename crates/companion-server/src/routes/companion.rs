//! Companion Routes - Persona CRUD
//!
//! HTTP handlers that delegate to CompanionService for business logic.
//! Writes read the caller from the session; reads are public.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::get,
    Json, Router,
};

use companion::{CompanionFields, CompanionFilter, DomainError};

use crate::auth::Session;
use crate::error::ApiError;
use crate::models::{CompanionQuery, CompanionRequest, CompanionResponse};
use crate::AppState;

/// Search companions
#[utoipa::path(
    get,
    path = "/api/companion",
    params(CompanionQuery),
    responses(
        (status = 200, description = "Matching companions", body = Vec<CompanionResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Companion"
)]
pub async fn list_companions(
    State(state): State<AppState>,
    Query(query): Query<CompanionQuery>,
) -> Result<Json<Vec<CompanionResponse>>, ApiError> {
    let filter = CompanionFilter::from(&query);
    let companions = state
        .companion_service
        .list(&filter)
        .await
        .map_err(ApiError::tagged("COMPANION_GET"))?;

    Ok(Json(companions.into_iter().map(Into::into).collect()))
}

/// Create new companion
#[utoipa::path(
    post,
    path = "/api/companion",
    request_body = CompanionRequest,
    responses(
        (status = 200, description = "Companion created", body = CompanionResponse),
        (status = 400, description = "Missing required fields"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Pro subscription required"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Companion"
)]
pub async fn create_companion(
    State(state): State<AppState>,
    Session(user): Session,
    payload: Result<Json<CompanionRequest>, JsonRejection>,
) -> Result<Json<CompanionResponse>, ApiError> {
    let fields = request_fields(payload, "COMPANION_POST")?;
    let companion = state
        .companion_service
        .create(user.as_ref(), fields)
        .await
        .map_err(ApiError::tagged("COMPANION_POST"))?;

    Ok(Json(companion.into()))
}

/// Get companion by ID
#[utoipa::path(
    get,
    path = "/api/companion/{companionId}",
    params(
        ("companionId" = String, Path, description = "Companion ID")
    ),
    responses(
        (status = 200, description = "Companion found", body = CompanionResponse),
        (status = 400, description = "Companion ID required"),
        (status = 404, description = "Companion not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Companion"
)]
pub async fn get_companion(
    State(state): State<AppState>,
    Path(companion_id): Path<String>,
) -> Result<Json<CompanionResponse>, ApiError> {
    let companion = state
        .companion_service
        .get(&companion_id)
        .await
        .map_err(ApiError::tagged("COMPANION_GET"))?;

    Ok(Json(companion.into()))
}

/// Update companion (full overwrite, pro only)
#[utoipa::path(
    patch,
    path = "/api/companion/{companionId}",
    params(
        ("companionId" = String, Path, description = "Companion ID")
    ),
    request_body = CompanionRequest,
    responses(
        (status = 200, description = "Companion updated", body = CompanionResponse),
        (status = 400, description = "Companion ID required / Missing required fields"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Pro subscription required"),
        (status = 404, description = "Companion not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Companion"
)]
pub async fn update_companion(
    State(state): State<AppState>,
    Session(user): Session,
    Path(companion_id): Path<String>,
    payload: Result<Json<CompanionRequest>, JsonRejection>,
) -> Result<Json<CompanionResponse>, ApiError> {
    let fields = request_fields(payload, "COMPANION_PATCH")?;
    let companion = state
        .companion_service
        .update(&companion_id, user.as_ref(), fields)
        .await
        .map_err(ApiError::tagged("COMPANION_PATCH"))?;

    Ok(Json(companion.into()))
}

/// Delete companion and its hosted image
#[utoipa::path(
    delete,
    path = "/api/companion/{companionId}",
    params(
        ("companionId" = String, Path, description = "Companion ID")
    ),
    responses(
        (status = 200, description = "Deleted companion", body = CompanionResponse),
        (status = 400, description = "Companion ID required"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Companion not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Companion"
)]
pub async fn delete_companion(
    State(state): State<AppState>,
    Session(user): Session,
    Path(companion_id): Path<String>,
) -> Result<Json<CompanionResponse>, ApiError> {
    let companion = state
        .companion_service
        .delete(&companion_id, user.as_ref())
        .await
        .map_err(ApiError::tagged("COMPANION_DELETE"))?;

    Ok(Json(companion.into()))
}

/// Fields of a create/update body.
///
/// A body that parses but carries mistyped fields counts as missing fields,
/// so the id and session checks still come first. A body that cannot be
/// read at all fails the request.
fn request_fields(
    payload: Result<Json<CompanionRequest>, JsonRejection>,
    operation: &'static str,
) -> Result<CompanionFields, ApiError> {
    match payload {
        Ok(Json(request)) => Ok(request.into()),
        Err(JsonRejection::JsonDataError(e)) => {
            tracing::debug!(operation, "Unusable companion fields: {}", e.body_text());
            Ok(CompanionFields::default())
        }
        Err(rejection) => Err(ApiError::tagged(operation)(DomainError::Internal(
            rejection.body_text(),
        ))),
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/companion", get(list_companions).post(create_companion))
        .route(
            "/api/companion/:companion_id",
            get(get_companion)
                .patch(update_companion)
                .delete(delete_companion),
        )
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::error::INTERNAL_ERROR;
    use crate::models::CompanionResponse;
    use crate::test_support::*;

    fn request(
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &TestApp, request: Request<Body>) -> Response {
        app.router().oneshot(request).await.unwrap()
    }

    fn edit_body(src: &str) -> Value {
        json!({
            "src": src,
            "name": "Elon Musk",
            "description": "CEO & Founder of Tesla, SpaceX",
            "instructions": "You are Elon Musk.",
            "seed": "Human: Hi Elon\nElon: Hey there",
            "categoryId": CATEGORY_ID
        })
    }

    async fn text(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    async fn companion_json(response: Response) -> CompanionResponse {
        serde_json::from_str(&text(response).await).unwrap()
    }

    fn owner_token() -> String {
        session_token("user_1", Some("Ada"))
    }

    fn existing_uri(app: &TestApp) -> String {
        format!("/api/companion/{}", app.existing.id)
    }

    // ---- PATCH ----

    #[tokio::test]
    async fn test_patch_blank_id_is_400() {
        let app = TestApp::new();
        let req = request(Method::PATCH, "/api/companion/%20", None, Some(edit_body(ELON_SRC)));

        let response = send(&app, req).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(text(response).await, "Companion ID required");
    }

    #[tokio::test]
    async fn test_patch_without_session_is_401() {
        let app = TestApp::new();
        let uri = existing_uri(&app);

        let req = request(Method::PATCH, &uri, None, Some(edit_body(ELON_SRC)));
        let response = send(&app, req).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(text(response).await, "Unauthorized");

        let forged = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiJ1c2VyXzEifQ.invalid";
        let req = request(Method::PATCH, &uri, Some(forged), Some(edit_body(ELON_SRC)));
        let response = send(&app, req).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_patch_missing_fields_is_400() {
        let app = TestApp::new();
        let mut body = edit_body(ELON_SRC);
        body["seed"] = json!("");

        let req = request(Method::PATCH, &existing_uri(&app), Some(&owner_token()), Some(body));
        let response = send(&app, req).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(text(response).await, "Missing required fields");
    }

    #[tokio::test]
    async fn test_patch_mistyped_field_counts_as_missing() {
        let app = TestApp::new();
        let mut body = edit_body(ELON_SRC);
        body["name"] = json!(123);

        let req = request(Method::PATCH, &existing_uri(&app), None, Some(body.clone()));
        let response = send(&app, req).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let req = request(Method::PATCH, &existing_uri(&app), Some(&owner_token()), Some(body));
        let response = send(&app, req).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(text(response).await, "Missing required fields");
        assert_eq!(app.companions.all()[0].name, "Elon");
    }

    #[tokio::test]
    async fn test_patch_unreadable_body_is_500() {
        let app = TestApp::new();
        let token = owner_token();

        let no_content_type = Request::builder()
            .method(Method::PATCH)
            .uri(existing_uri(&app))
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(edit_body(ELON_SRC).to_string()))
            .unwrap();
        let response = send(&app, no_content_type).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(text(response).await, INTERNAL_ERROR);

        let malformed = Request::builder()
            .method(Method::PATCH)
            .uri(existing_uri(&app))
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();
        let response = send(&app, malformed).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(text(response).await, INTERNAL_ERROR);

        assert_eq!(app.companions.all()[0].name, "Elon");
        assert!(app.images.destroyed().is_empty());
    }

    #[tokio::test]
    async fn test_patch_non_subscriber_is_403() {
        let app = TestApp::new();
        app.subscriptions.clear();

        let req = request(
            Method::PATCH,
            &existing_uri(&app),
            Some(&owner_token()),
            Some(edit_body(ELON_SRC)),
        );
        let response = send(&app, req).await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(text(response).await, "Pro subscription required");
    }

    #[tokio::test]
    async fn test_patch_unknown_id_is_404() {
        let app = TestApp::new();
        let uri = format!("/api/companion/{}", Uuid::new_v4());

        let req = request(Method::PATCH, &uri, Some(&owner_token()), Some(edit_body(ELON_SRC)));
        let response = send(&app, req).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(text(response).await, "Companion not found");
    }

    #[tokio::test]
    async fn test_patch_returns_updated_companion() {
        let app = TestApp::new();
        let new_src = "https://res.cloudinary.com/demo/image/upload/v9/companions/musk.webp";

        let req = request(
            Method::PATCH,
            &existing_uri(&app),
            Some(&owner_token()),
            Some(edit_body(new_src)),
        );
        let response = send(&app, req).await;

        assert_eq!(response.status(), StatusCode::OK);
        let updated = companion_json(response).await;
        assert_eq!(updated.id, app.existing.id);
        assert_eq!(updated.name, "Elon Musk");
        assert_eq!(updated.user_name, "Ada");
        assert_eq!(updated.src, new_src);
        assert_eq!(app.images.destroyed(), vec!["companions/elon".to_string()]);
    }

    #[tokio::test]
    async fn test_patch_accepts_session_cookie() {
        let app = TestApp::new();
        let mut req = request(Method::PATCH, &existing_uri(&app), None, Some(edit_body(ELON_SRC)));
        req.headers_mut().insert(
            header::COOKIE,
            format!("__session={}", owner_token()).parse().unwrap(),
        );

        let response = send(&app, req).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(app.images.destroyed().is_empty());
    }

    // ---- DELETE ----

    #[tokio::test]
    async fn test_delete_without_session_is_401() {
        let app = TestApp::new();

        let response = send(&app, request(Method::DELETE, &existing_uri(&app), None, None)).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(app.companions.all().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_other_users_companion_is_404() {
        let app = TestApp::new();
        let intruder = session_token("user_2", Some("Eve"));

        let req = request(Method::DELETE, &existing_uri(&app), Some(&intruder), None);
        let response = send(&app, req).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(app.companions.all().len(), 1);
        assert!(app.images.destroyed().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_record_and_one_image() {
        let app = TestApp::new();
        let token = session_token("user_1", None);

        let req = request(Method::DELETE, &existing_uri(&app), Some(&token), None);
        let response = send(&app, req).await;

        assert_eq!(response.status(), StatusCode::OK);
        let deleted = companion_json(response).await;
        assert_eq!(deleted.id, app.existing.id);
        assert!(app.companions.all().is_empty());
        assert_eq!(app.images.destroyed(), vec!["companions/elon".to_string()]);
    }

    // ---- reads / create ----

    #[tokio::test]
    async fn test_get_companion() {
        let app = TestApp::new();

        let response = send(&app, request(Method::GET, &existing_uri(&app), None, None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(companion_json(response).await.name, "Elon");

        let req = request(Method::GET, "/api/companion/unknown", None, None);
        let response = send(&app, req).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search_skips_empty_parameters() {
        let app = TestApp::new();

        let req = request(Method::GET, "/api/companion?name=&categoryId=", None, None);
        let response = send(&app, req).await;
        assert_eq!(response.status(), StatusCode::OK);
        let all: Vec<CompanionResponse> = serde_json::from_str(&text(response).await).unwrap();
        assert_eq!(all.len(), 1);

        let req = request(Method::GET, "/api/companion?name=zzz", None, None);
        let response = send(&app, req).await;
        let none: Vec<CompanionResponse> = serde_json::from_str(&text(response).await).unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_create_companion() {
        let app = TestApp::new();

        let req = request(
            Method::POST,
            "/api/companion",
            Some(&owner_token()),
            Some(edit_body(ELON_SRC)),
        );
        let response = send(&app, req).await;

        assert_eq!(response.status(), StatusCode::OK);
        let created = companion_json(response).await;
        assert_eq!(created.user_id, "user_1");
        assert_eq!(created.category_id.to_string(), CATEGORY_ID);
        assert_eq!(app.companions.all().len(), 2);
    }

    #[tokio::test]
    async fn test_create_mistyped_field_is_400() {
        let app = TestApp::new();
        let mut body = edit_body(ELON_SRC);
        body["categoryId"] = json!(["not", "a", "string"]);

        let req = request(Method::POST, "/api/companion", Some(&owner_token()), Some(body));
        let response = send(&app, req).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(text(response).await, "Missing required fields");
        assert_eq!(app.companions.all().len(), 1);
    }
}
