//! PostgreSQL Repository Implementations

mod category_repository;
mod companion_repository;
mod subscription_repository;

pub use category_repository::PgCategoryRepository;
pub use companion_repository::PgCompanionRepository;
pub use subscription_repository::PgSubscriptionRepository;

use companion::DomainError;

/// PostgreSQL error codes surfaced as client errors
const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";

/// Map a sqlx error into the domain.
///
/// A dangling category reference is the caller's mistake, not ours.
pub(crate) fn repository_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some(FOREIGN_KEY_VIOLATION) => {
                return DomainError::validation("Invalid category");
            }
            Some(UNIQUE_VIOLATION) => {
                return DomainError::Conflict(db_err.message().to_string());
            }
            _ => {}
        }
    }
    DomainError::Repository(err.to_string())
}
