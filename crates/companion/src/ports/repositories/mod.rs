//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod category_repository;
mod companion_repository;
mod subscription_repository;

pub use category_repository::*;
pub use companion_repository::*;
pub use subscription_repository::*;
