//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Companion: Persona a user creates and converses with
//! - Category: Grouping shown in the companion browser
//! - UserSubscription: Billing record backing the pro gate
//! - SessionUser: Verified caller of a request

mod category;
mod companion;
mod session_user;
mod subscription;

pub use category::*;
pub use companion::*;
pub use session_user::*;
pub use subscription::*;
