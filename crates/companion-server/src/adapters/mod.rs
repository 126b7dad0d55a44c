//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod cloudinary;
pub mod postgres;

// Re-exports
pub use cloudinary::CloudinaryImageHost;
pub use postgres::{PgCategoryRepository, PgCompanionRepository, PgSubscriptionRepository};
