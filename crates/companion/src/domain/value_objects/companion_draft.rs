//! CompanionDraft - Validated companion field set
//!
//! Create and update both take the full field set. Raw request values are
//! loose (any field may be absent, the seed may be a string or a number);
//! a draft only exists once every field is present.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;

pub const MISSING_FIELDS: &str = "Missing required fields";

/// Unvalidated companion fields as received from a client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionFields {
    pub src: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub seed: Option<serde_json::Value>,
    pub category_id: Option<String>,
}

/// Complete, validated companion fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionDraft {
    pub src: String,
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub seed: String,
    pub category_id: Uuid,
}

impl CompanionDraft {
    /// Validate raw fields into a draft.
    ///
    /// Empty strings count as missing. A category id that is present but
    /// not a UUID can never reference a category and is rejected as well.
    pub fn from_fields(fields: CompanionFields) -> Result<Self, DomainError> {
        let missing = || DomainError::validation(MISSING_FIELDS);

        let src = present(fields.src).ok_or_else(missing)?;
        let name = present(fields.name).ok_or_else(missing)?;
        let description = present(fields.description).ok_or_else(missing)?;
        let instructions = present(fields.instructions).ok_or_else(missing)?;
        let seed = fields.seed.as_ref().and_then(seed_text).ok_or_else(missing)?;
        let category_id = present(fields.category_id).ok_or_else(missing)?;

        let category_id = Uuid::parse_str(&category_id)
            .map_err(|_| DomainError::validation("Invalid category"))?;

        Ok(Self {
            src,
            name,
            description,
            instructions,
            seed,
            category_id,
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Normalize a seed value to its stored text form.
///
/// Strings are kept as-is, numbers become their decimal text. Empty
/// strings, zero and every other JSON type count as missing.
pub fn seed_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
