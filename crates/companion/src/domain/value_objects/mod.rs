//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod companion_draft;
mod companion_filter;
mod image_public_id;

pub use companion_draft::*;
pub use companion_filter::*;
pub use image_public_id::*;
