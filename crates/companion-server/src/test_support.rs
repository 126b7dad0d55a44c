//! In-memory port implementations and fixtures for tests

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use companion::{
    Category, CategoryRepository, Companion, CompanionDraft, CompanionFields, CompanionFilter,
    CompanionRepository, DomainError, ImageDestroyOutcome, ImageHost, ImagePublicId, SessionUser,
    SubscriptionRepository, UserSubscription,
};

pub const ELON_SRC: &str = "https://res.cloudinary.com/demo/image/upload/v1/companions/elon.png";
pub const CATEGORY_ID: &str = "8c4f8a7e-2d3b-4c59-9a0c-5f1e2d3c4b5a";

pub fn author(user_id: &str) -> SessionUser {
    SessionUser::new(user_id, Some(format!("Tester {user_id}")))
}

pub fn sample_fields(src: &str) -> CompanionFields {
    CompanionFields {
        src: Some(src.to_string()),
        name: Some("Elon".to_string()),
        description: Some("CEO & Founder of Tesla, SpaceX".to_string()),
        instructions: Some("You are Elon Musk.".to_string()),
        seed: Some(serde_json::json!("Human: Hi Elon\nElon: Hey there")),
        category_id: Some(CATEGORY_ID.to_string()),
    }
}

pub fn sample_companion(user_id: &str, src: &str) -> Companion {
    let draft = CompanionDraft::from_fields(sample_fields(src)).unwrap();
    Companion::new(user_id.to_string(), format!("Tester {user_id}"), draft)
}

/// Companion store backed by a vector
#[derive(Default)]
pub struct InMemoryCompanions {
    rows: Mutex<Vec<Companion>>,
}

impl InMemoryCompanions {
    pub fn with(companions: Vec<Companion>) -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(companions),
        })
    }

    pub fn all(&self) -> Vec<Companion> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompanionRepository for InMemoryCompanions {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Companion>, DomainError> {
        Ok(self.all().into_iter().find(|c| c.id == id))
    }

    async fn find_for_user(
        &self,
        id: Uuid,
        user_id: &str,
    ) -> Result<Option<Companion>, DomainError> {
        Ok(self
            .all()
            .into_iter()
            .find(|c| c.id == id && c.is_owned_by(user_id)))
    }

    async fn search(&self, filter: &CompanionFilter) -> Result<Vec<Companion>, DomainError> {
        let needle = filter.name.as_ref().map(|n| n.to_lowercase());
        let mut hits: Vec<Companion> = self
            .all()
            .into_iter()
            .filter(|c| {
                needle
                    .as_ref()
                    .map_or(true, |n| c.name.to_lowercase().contains(n))
            })
            .filter(|c| filter.category_id.map_or(true, |id| c.category_id == id))
            .collect();
        hits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(hits)
    }

    async fn insert(&self, companion: &Companion) -> Result<Companion, DomainError> {
        self.rows.lock().unwrap().push(companion.clone());
        Ok(companion.clone())
    }

    async fn update(&self, companion: &Companion) -> Result<Companion, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|c| c.id == companion.id && c.user_id == companion.user_id)
            .ok_or_else(|| DomainError::not_found("Companion", companion.id))?;
        *row = companion.clone();
        Ok(row.clone())
    }

    async fn delete_for_user(&self, id: Uuid, user_id: &str) -> Result<bool, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| !(c.id == id && c.is_owned_by(user_id)));
        Ok(rows.len() < before)
    }
}

/// Subscription store keyed by user id
#[derive(Default)]
pub struct InMemorySubscriptions {
    rows: Mutex<HashMap<String, UserSubscription>>,
}

impl InMemorySubscriptions {
    pub fn active_for(user_ids: &[&str]) -> Arc<Self> {
        let store = Self::default();
        for user_id in user_ids {
            store.activate(user_id);
        }
        Arc::new(store)
    }

    pub fn activate(&self, user_id: &str) {
        let subscription = UserSubscription {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            stripe_customer_id: Some(format!("cus_{user_id}")),
            stripe_subscription_id: Some(format!("sub_{user_id}")),
            stripe_price_id: Some("price_pro".to_string()),
            stripe_current_period_end: Some(Utc::now() + Duration::days(30)),
        };
        self.rows
            .lock()
            .unwrap()
            .insert(user_id.to_string(), subscription);
    }

    pub fn clear(&self) {
        self.rows.lock().unwrap().clear();
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptions {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<UserSubscription>, DomainError> {
        Ok(self.rows.lock().unwrap().get(user_id).cloned())
    }
}

pub struct InMemoryCategories(pub Vec<Category>);

#[async_trait]
impl CategoryRepository for InMemoryCategories {
    async fn find_all(&self) -> Result<Vec<Category>, DomainError> {
        let mut categories = self.0.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

/// Image host that records every destroy call
#[derive(Default)]
pub struct RecordingImageHost {
    destroyed: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingImageHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    pub fn destroyed(&self) -> Vec<String> {
        self.destroyed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageHost for RecordingImageHost {
    async fn destroy(&self, public_id: &ImagePublicId) -> Result<ImageDestroyOutcome, DomainError> {
        self.destroyed
            .lock()
            .unwrap()
            .push(public_id.as_str().to_string());

        if self.fail {
            Err(DomainError::ExternalService("image host unavailable".into()))
        } else {
            Ok(ImageDestroyOutcome::Destroyed)
        }
    }
}

pub const SESSION_SECRET: &str = "test-session-secret";

/// Signed session token for `user_id`, valid for an hour
pub fn session_token(user_id: &str, first_name: Option<&str>) -> String {
    let claims = crate::auth::SessionClaims {
        sub: user_id.to_string(),
        first_name: first_name.map(str::to_string),
        exp: (Utc::now().timestamp() + 3600) as usize,
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(SESSION_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Router wired to in-memory ports.
///
/// Starts with one companion (`ELON_SRC`) owned by `user_1`, who is
/// subscribed. Images live in the `companions` folder.
pub struct TestApp {
    pub companions: Arc<InMemoryCompanions>,
    pub subscriptions: Arc<InMemorySubscriptions>,
    pub images: Arc<RecordingImageHost>,
    pub categories: Arc<InMemoryCategories>,
    pub existing: Companion,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_categories(Vec::new())
    }

    pub fn with_categories(categories: Vec<Category>) -> Self {
        let existing = sample_companion("user_1", ELON_SRC);
        Self {
            companions: InMemoryCompanions::with(vec![existing.clone()]),
            subscriptions: InMemorySubscriptions::active_for(&["user_1"]),
            images: RecordingImageHost::new(),
            categories: Arc::new(InMemoryCategories(categories)),
            existing,
        }
    }

    pub fn router(&self) -> axum::Router {
        let companion_service = crate::application::CompanionService::new(
            self.companions.clone(),
            self.subscriptions.clone(),
        )
        .with_image_host(self.images.clone(), Some("companions".to_string()));

        let sessions = crate::auth::SessionVerifier::new(Some(&crate::config::SessionKey::Secret(
            SESSION_SECRET.to_string(),
        )))
        .unwrap();

        crate::build_router(crate::AppState {
            companion_service: Arc::new(companion_service),
            category_service: Arc::new(crate::application::CategoryService::new(
                self.categories.clone(),
            )),
            sessions: Arc::new(sessions),
        })
    }
}
