//! Server Configuration
//!
//! Read from Shuttle secrets through a key lookup so tests can feed a map.
//! Each key also accepts its legacy `NEXT_PUBLIC_` spelling.

/// Secret keys
pub const SESSION_JWT_PUBLIC_KEY: &str = "SESSION_JWT_PUBLIC_KEY";
pub const SESSION_JWT_SECRET: &str = "SESSION_JWT_SECRET";
pub const CLOUDINARY_CLOUD_NAME: &str = "CLOUDINARY_CLOUD_NAME";
pub const CLOUDINARY_API_KEY: &str = "CLOUDINARY_API_KEY";
pub const CLOUDINARY_API_SECRET: &str = "CLOUDINARY_API_SECRET";
pub const CLOUDINARY_UPLOAD_FOLDER_NAME: &str = "CLOUDINARY_UPLOAD_FOLDER_NAME";

const LEGACY_PREFIX: &str = "NEXT_PUBLIC_";

/// How session tokens are verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionKey {
    /// PEM-encoded RSA public key (RS256), as published by the auth provider
    RsaPublicPem(String),
    /// Shared secret (HS256)
    Secret(String),
}

/// Cloudinary account used for image cleanup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Folder uploads are placed in; prefixes every public id
    pub upload_folder: Option<String>,
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub session_key: Option<SessionKey>,
    pub cloudinary: Option<CloudinaryConfig>,
}

impl AppConfig {
    /// Build configuration from a secret lookup.
    ///
    /// An RSA public key wins over a shared secret. Cloudinary is only
    /// configured when cloud name, API key and API secret are all set.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let get = |key: &str| present(key).or_else(|| present(&format!("{LEGACY_PREFIX}{key}")));

        let session_key = get(SESSION_JWT_PUBLIC_KEY)
            .map(SessionKey::RsaPublicPem)
            .or_else(|| get(SESSION_JWT_SECRET).map(SessionKey::Secret));

        let cloudinary = match (
            get(CLOUDINARY_CLOUD_NAME),
            get(CLOUDINARY_API_KEY),
            get(CLOUDINARY_API_SECRET),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(CloudinaryConfig {
                cloud_name,
                api_key,
                api_secret,
                upload_folder: get(CLOUDINARY_UPLOAD_FOLDER_NAME),
            }),
            _ => None,
        };

        Self {
            session_key,
            cloudinary,
        }
    }
}
