//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and external services.

mod category_service;
mod companion_service;

pub use category_service::CategoryService;
pub use companion_service::{CompanionService, COMPANION_ID_REQUIRED, PRO_REQUIRED};
