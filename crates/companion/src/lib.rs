//! Companion Domain Library
//!
//! Core domain types and interfaces for the Companion persona service.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Companion, Category, UserSubscription, SessionUser)
//!   - `value_objects/`: Immutable value types (CompanionDraft, CompanionFilter, ImagePublicId)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: External service interfaces
//!
//! # Usage
//!
//! ```rust,ignore
//! use companion::domain::{Companion, CompanionDraft, ImagePublicId};
//! use companion::ports::{CompanionRepository, ImageHost};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    file_stem, seed_text, Category, Companion, CompanionDraft, CompanionFields, CompanionFilter,
    DomainError, ImagePublicId, SessionUser, UserSubscription, MISSING_FIELDS,
    SUBSCRIPTION_GRACE_MS,
};
pub use ports::{
    // Repositories
    CategoryRepository,
    CompanionRepository,
    // Services
    ImageDestroyOutcome,
    ImageHost,
    SubscriptionRepository,
};
