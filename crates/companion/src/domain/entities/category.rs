//! Category - Companion grouping

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category a companion belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}
