//! SessionUser - Verified request caller

use serde::{Deserialize, Serialize};

/// Caller identity resolved from a verified session token.
///
/// The id is the auth provider's user id (`sub`). The first name is only
/// present when the session carries it, and it becomes the companion's
/// `user_name` on write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub first_name: Option<String>,
}

impl SessionUser {
    pub fn new(id: impl Into<String>, first_name: Option<String>) -> Self {
        Self {
            id: id.into(),
            first_name,
        }
    }

    /// Display name usable as a companion author, if any
    pub fn display_name(&self) -> Option<&str> {
        self.first_name.as_deref().filter(|name| !name.is_empty())
    }
}
