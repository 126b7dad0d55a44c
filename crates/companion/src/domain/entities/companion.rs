//! Companion - Persona a user creates and converses with
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{CompanionDraft, ImagePublicId};

/// Companion - persisted persona record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Companion {
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

impl Companion {
    /// Create a new Companion owned by `user_id` from a validated draft
    pub fn new(user_id: String, user_name: String, draft: CompanionDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            user_name,
            category_id: draft.category_id,
            name: draft.name,
            description: draft.description,
            instructions: draft.instructions,
            seed: draft.seed,
            src: draft.src,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every editable field with the draft (last write wins)
    pub fn overwrite(self, user_id: String, user_name: String, draft: CompanionDraft) -> Self {
        Self {
            id: self.id,
            user_id,
            user_name,
            category_id: draft.category_id,
            name: draft.name,
            description: draft.description,
            instructions: draft.instructions,
            seed: draft.seed,
            src: draft.src,
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }

    /// Hosted image key of the current `src`
    pub fn image_public_id(&self, folder: Option<&str>) -> ImagePublicId {
        ImagePublicId::from_url(&self.src, folder)
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}
