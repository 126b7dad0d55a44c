//! Service Ports
//!
//! Abstract interfaces for external services.

mod image_host;

pub use image_host::*;
