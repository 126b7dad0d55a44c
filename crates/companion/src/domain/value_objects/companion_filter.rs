//! CompanionFilter - Search criteria for browsing companions

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Companion search criteria.
///
/// `name` matches case-insensitively anywhere in the companion name.
/// Empty values mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionFilter {
    pub name: Option<String>,
    pub category_id: Option<Uuid>,
}

impl CompanionFilter {
    /// Build a filter from loose query values, dropping empty ones.
    ///
    /// A category id that does not parse is dropped as well; no companion
    /// could match it.
    pub fn from_query(name: Option<&str>, category_id: Option<&str>) -> Self {
        Self {
            name: name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            category_id: category_id
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .and_then(|c| Uuid::parse_str(c).ok()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category_id.is_none()
    }

    /// Query pairs with empty values skipped, in `name`, `categoryId` order
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            pairs.push(("name", name.to_string()));
        }
        if let Some(category_id) = self.category_id {
            pairs.push(("categoryId", category_id.to_string()));
        }
        pairs
    }

    /// Pattern for a case-insensitive substring match (`ILIKE`), with
    /// wildcard characters in the name escaped
    pub fn name_pattern(&self) -> Option<String> {
        self.name.as_deref().map(|name| {
            let escaped = name
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            format!("%{escaped}%")
        })
    }
}
