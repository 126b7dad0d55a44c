//! ImagePublicId - Hosted image key derived from an image URL

use serde::{Deserialize, Serialize};

/// Object key of a hosted image, e.g. `companions/elon` for
/// `https://res.cloudinary.com/demo/image/upload/v17/companions/elon.png`
/// uploaded into the `companions` folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImagePublicId(String);

impl ImagePublicId {
    /// Derive the key from a stored image URL.
    ///
    /// Takes the last path segment, drops its final extension and places
    /// the result under `folder` when one is configured.
    pub fn from_url(url: &str, folder: Option<&str>) -> Self {
        let stem = file_stem(url);

        match folder.map(|f| f.trim_end_matches('/')).filter(|f| !f.is_empty()) {
            Some(folder) => Self(format!("{folder}/{stem}")),
            None => Self(stem.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImagePublicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// File name without its final extension.
///
/// The directory part ends at the last `/` on the first line. The
/// extension is a trailing `.` followed by at least one character that is
/// neither `.` nor `/`, so `archive.` and `dir.d/file` keep their dots.
pub fn file_stem(url: &str) -> &str {
    let first_line = url.find('\n').unwrap_or(url.len());
    let name = match url[..first_line].rfind('/') {
        Some(slash) => &url[slash + 1..],
        None => url,
    };

    match name.rfind('.') {
        Some(dot) => {
            let ext = &name[dot + 1..];
            if ext.is_empty() || ext.contains('/') {
                name
            } else {
                &name[..dot]
            }
        }
        None => name,
    }
}
