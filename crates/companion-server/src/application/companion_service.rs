//! Companion Application Service (Use Case)
//!
//! Orchestrates companion CRUD. Preconditions are checked in a fixed order
//! (id, session, fields, subscription, ownership) so every caller sees the
//! same status for the same request.

use std::sync::Arc;
use uuid::Uuid;

use companion::{
    Companion, CompanionDraft, CompanionFields, CompanionFilter, CompanionRepository, DomainError,
    ImageDestroyOutcome, ImageHost, SessionUser, SubscriptionRepository,
};

pub const COMPANION_ID_REQUIRED: &str = "Companion ID required";
pub const PRO_REQUIRED: &str = "Pro subscription required";

/// Application service for Companion operations
pub struct CompanionService {
    companions: Arc<dyn CompanionRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    image_host: Option<Arc<dyn ImageHost>>,
    upload_folder: Option<String>,
}

impl CompanionService {
    pub fn new(
        companions: Arc<dyn CompanionRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            companions,
            subscriptions,
            image_host: None,
            upload_folder: None,
        }
    }

    /// Delete replaced and removed images from `image_host`
    pub fn with_image_host(
        mut self,
        image_host: Arc<dyn ImageHost>,
        upload_folder: Option<String>,
    ) -> Self {
        self.image_host = Some(image_host);
        self.upload_folder = upload_folder;
        self
    }

    /// Search companions, newest first
    pub async fn list(&self, filter: &CompanionFilter) -> Result<Vec<Companion>, DomainError> {
        self.companions.search(filter).await
    }

    /// Get any companion by ID
    pub async fn get(&self, companion_id: &str) -> Result<Companion, DomainError> {
        let id = parse_companion_id(companion_id)?;

        match id {
            Some(id) => self.companions.find_by_id(id).await?,
            None => None,
        }
        .ok_or_else(|| DomainError::not_found("Companion", companion_id))
    }

    /// Create a companion for the session user (requires an active subscription)
    pub async fn create(
        &self,
        user: Option<&SessionUser>,
        fields: CompanionFields,
    ) -> Result<Companion, DomainError> {
        let (user, user_name) = require_author(user)?;
        let draft = CompanionDraft::from_fields(fields)?;
        self.require_pro(&user.id).await?;

        let companion = Companion::new(user.id.clone(), user_name.to_string(), draft);
        let saved = self.companions.insert(&companion).await?;

        tracing::info!(
            companion_id = %saved.id,
            user_id = %user.id,
            "Created companion: {}",
            saved.name
        );

        Ok(saved)
    }

    /// Overwrite a companion owned by the session user.
    ///
    /// When the image changes, the old hosted image is destroyed before the
    /// record is written.
    pub async fn update(
        &self,
        companion_id: &str,
        user: Option<&SessionUser>,
        fields: CompanionFields,
    ) -> Result<Companion, DomainError> {
        let id = parse_companion_id(companion_id)?;
        let (user, user_name) = require_author(user)?;
        let draft = CompanionDraft::from_fields(fields)?;
        self.require_pro(&user.id).await?;

        let existing = self.find_owned(id, companion_id, &user.id).await?;

        if draft.src != existing.src {
            self.destroy_image(&existing).await?;
        }

        let updated = existing.overwrite(user.id.clone(), user_name.to_string(), draft);
        let saved = self.companions.update(&updated).await?;

        tracing::info!(companion_id = %saved.id, user_id = %user.id, "Updated companion");

        Ok(saved)
    }

    /// Delete a companion owned by the session user, then its hosted image
    pub async fn delete(
        &self,
        companion_id: &str,
        user: Option<&SessionUser>,
    ) -> Result<Companion, DomainError> {
        let id = parse_companion_id(companion_id)?;
        let user = require_user(user)?;

        let companion = self.find_owned(id, companion_id, &user.id).await?;

        if !self.companions.delete_for_user(companion.id, &user.id).await? {
            return Err(DomainError::not_found("Companion", companion.id));
        }

        tracing::info!(companion_id = %companion.id, user_id = %user.id, "Deleted companion");

        self.destroy_image(&companion).await?;

        Ok(companion)
    }

    /// Whether the user currently holds an active subscription
    pub async fn is_pro(&self, user_id: &str) -> Result<bool, DomainError> {
        Ok(self
            .subscriptions
            .find_by_user(user_id)
            .await?
            .is_some_and(|subscription| subscription.is_active()))
    }

    async fn require_pro(&self, user_id: &str) -> Result<(), DomainError> {
        if self.is_pro(user_id).await? {
            Ok(())
        } else {
            Err(DomainError::Forbidden(PRO_REQUIRED.to_string()))
        }
    }

    async fn find_owned(
        &self,
        id: Option<Uuid>,
        companion_id: &str,
        user_id: &str,
    ) -> Result<Companion, DomainError> {
        match id {
            Some(id) => self.companions.find_for_user(id, user_id).await?,
            None => None,
        }
        .ok_or_else(|| DomainError::not_found("Companion", companion_id))
    }

    async fn destroy_image(&self, companion: &Companion) -> Result<(), DomainError> {
        let public_id = companion.image_public_id(self.upload_folder.as_deref());

        let Some(image_host) = &self.image_host else {
            tracing::warn!(%public_id, "No image host configured, image left in place");
            return Ok(());
        };

        match image_host.destroy(&public_id).await? {
            ImageDestroyOutcome::Destroyed => {
                tracing::info!(%public_id, "Destroyed companion image");
            }
            ImageDestroyOutcome::NotFound => {
                tracing::warn!(%public_id, "Companion image already gone");
            }
        }

        Ok(())
    }
}

/// Blank ids are a client error. Ids that are not UUIDs cannot match any
/// record, so they resolve to `None` and surface as not found.
fn parse_companion_id(raw: &str) -> Result<Option<Uuid>, DomainError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DomainError::validation(COMPANION_ID_REQUIRED));
    }
    Ok(Uuid::parse_str(raw).ok())
}

fn require_user(user: Option<&SessionUser>) -> Result<&SessionUser, DomainError> {
    user.filter(|u| !u.id.is_empty())
        .ok_or(DomainError::Unauthorized)
}

/// Writers must also carry a display name; it is stored on the companion
fn require_author(user: Option<&SessionUser>) -> Result<(&SessionUser, &str), DomainError> {
    let user = require_user(user)?;
    let name = user.display_name().ok_or(DomainError::Unauthorized)?;
    Ok((user, name))
}
