//! Companion API Data Models
//!
//! - Companion: Persona records and their write payloads
//! - Category: Companion groupings

mod category;
mod companion;

pub use self::category::*;
pub use self::companion::*;
