//! Companion API Routes
//!
//! - /api/companion - Companion browse and create
//! - /api/companion/:companionId - Companion read, edit, delete
//! - /api/category - Categories

pub mod category;
pub mod companion;
pub mod swagger;
