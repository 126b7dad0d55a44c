//! Image Host Port
//!
//! Abstract interface for the service that stores companion images.
//! Uploads happen client-side; the server only ever removes images.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, ImagePublicId};

/// Result of a destroy request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageDestroyOutcome {
    /// The image existed and was removed
    Destroyed,
    /// The host had no image under that key
    NotFound,
}

/// Service interface for hosted image management
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Remove the image stored under `public_id`
    async fn destroy(&self, public_id: &ImagePublicId) -> Result<ImageDestroyOutcome, DomainError>;
}
