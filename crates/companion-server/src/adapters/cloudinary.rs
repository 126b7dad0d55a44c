//! Cloudinary Image Host Implementation
//!
//! Removes companion images through Cloudinary's signed destroy endpoint
//! using reqwest.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;

use companion::{DomainError, ImageDestroyOutcome, ImageHost, ImagePublicId};

use crate::config::CloudinaryConfig;

pub const CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Body of a destroy response, e.g. `{"result":"ok"}`
#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

/// Cloudinary implementation of ImageHost
pub struct CloudinaryImageHost {
    client: Client,
    config: CloudinaryConfig,
    base_url: String,
}

impl CloudinaryImageHost {
    pub fn new(config: CloudinaryConfig) -> Result<Self, DomainError> {
        Self::with_base_url(config, CLOUDINARY_API_BASE)
    }

    pub fn with_base_url(config: CloudinaryConfig, base_url: &str) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                DomainError::ExternalService(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            config,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn upload_folder(&self) -> Option<&str> {
        self.config.upload_folder.as_deref()
    }

    fn destroy_url(&self) -> String {
        format!("{}/{}/image/destroy", self.base_url, self.config.cloud_name)
    }

    /// Sign request parameters.
    ///
    /// Parameters are sorted by name, joined as `k=v&k=v`, suffixed with the
    /// API secret and hashed with SHA-256.
    pub fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted: Vec<_> = params.to_vec();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let to_sign = sorted
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(self.config.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[async_trait]
impl ImageHost for CloudinaryImageHost {
    async fn destroy(&self, public_id: &ImagePublicId) -> Result<ImageDestroyOutcome, DomainError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign(&[("public_id", public_id.as_str()), ("timestamp", &timestamp)]);

        let form = [
            ("public_id", public_id.as_str()),
            ("timestamp", timestamp.as_str()),
            ("api_key", self.config.api_key.as_str()),
            ("signature", signature.as_str()),
        ];

        let resp = self
            .client
            .post(self.destroy_url())
            .form(&form)
            .send()
            .await
            .map_err(|e| DomainError::ExternalService(format!("Cloudinary request failed: {e}")))?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(DomainError::ExternalService(format!(
                "Cloudinary destroy failed ({status}): {body}"
            )));
        }

        destroy_outcome(&body)
    }
}

/// Interpret a successful destroy response body
fn destroy_outcome(body: &str) -> Result<ImageDestroyOutcome, DomainError> {
    let parsed: DestroyResponse = serde_json::from_str(body).map_err(|e| {
        DomainError::ExternalService(format!("Unexpected Cloudinary response: {e}"))
    })?;

    match parsed.result.as_str() {
        "ok" => Ok(ImageDestroyOutcome::Destroyed),
        "not found" => Ok(ImageDestroyOutcome::NotFound),
        other => Err(DomainError::ExternalService(format!(
            "Cloudinary destroy returned '{other}'"
        ))),
    }
}
