//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{User, UserCredentials, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The store refused the insert because the username is taken.
        Duplicate { username: String } => "user {username} already exists",
    }
}

/// User lookup and creation.
///
/// Usernames are the natural key. Adapters must reject a second `create` for
/// an existing username with [`UserPersistenceError::Duplicate`] when the
/// store can enforce it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user identity by username, without the password hash.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user together with the stored password hash.
    async fn find_credentials_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserCredentials>, UserPersistenceError>;

    /// Insert a new user record.
    async fn create(&self, credentials: &UserCredentials) -> Result<(), UserPersistenceError>;
}
