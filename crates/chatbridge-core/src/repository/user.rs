//! UserRepository trait definition.

use chatbridge_types::error::RepositoryError;
use chatbridge_types::user::{User, UserId};

/// Repository trait for locally registered users.
///
/// Implementations live in chatbridge-infra (e.g., `SqliteUserRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait UserRepository: Send + Sync {
    /// Look up a user by id.
    fn find_by_id(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Insert a new user. Fails with `Conflict` if the id already exists.
    fn insert(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
