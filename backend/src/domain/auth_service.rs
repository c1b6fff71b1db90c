//! Login and registration use case.
//!
//! Login and registration share no mutable state; each call is independent.
//! Registration checks for an existing username before inserting. The two
//! calls are not atomic, so adapters backed by a store with conditional
//! writes also reject duplicates at insert time and the use case maps that
//! rejection to the same validation failure.

use std::sync::Arc;

use tracing::info;

use super::error_mapping::{
    USER_EXISTS_MESSAGE, map_password_hash_error, map_token_issue_error,
    map_user_persistence_error,
};
use super::ports::{PasswordHasher, TokenService, UserRepository};
use super::{
    AccessToken, DomainError, LoginCredentials, TokenPayload, User, UserCredentials, UserId,
};

/// Message shared by every login failure so callers cannot tell an unknown
/// username from a wrong password.
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid login credentials";

/// Orchestrates credential verification, hashing and token issuance.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    /// Create the use case from its ports.
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Verify credentials and issue an access token for the user.
    ///
    /// # Errors
    /// - [`ErrorKind::Permission`] with [`INVALID_LOGIN_MESSAGE`] when the
    ///   username is unknown or the password does not match.
    /// - [`ErrorKind::Unknown`] when a collaborator fails.
    ///
    /// [`ErrorKind::Permission`]: super::ErrorKind::Permission
    /// [`ErrorKind::Unknown`]: super::ErrorKind::Unknown
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken, DomainError> {
        let Some(stored) = self
            .users
            .find_credentials_by_username(credentials.username())
            .await
            .map_err(map_user_persistence_error)?
        else {
            return Err(invalid_login());
        };

        let matches = self
            .passwords
            .verify(credentials.password(), stored.password_hash())
            .await
            .map_err(map_password_hash_error)?;
        if !matches {
            return Err(invalid_login());
        }

        let user_id = *stored.user().id();
        let token = self
            .tokens
            .issue(&TokenPayload::new(user_id))
            .map_err(map_token_issue_error)?;
        info!(user_id = %user_id, "access token issued");
        Ok(token)
    }

    /// Register a new user under a unique username.
    ///
    /// # Errors
    /// - [`ErrorKind::Validation`] when the username is already taken.
    /// - [`ErrorKind::Unknown`] when a collaborator fails.
    ///
    /// [`ErrorKind::Validation`]: super::ErrorKind::Validation
    /// [`ErrorKind::Unknown`]: super::ErrorKind::Unknown
    pub async fn register(&self, credentials: &LoginCredentials) -> Result<(), DomainError> {
        let existing = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_persistence_error)?;
        if existing.is_some() {
            return Err(DomainError::validation(USER_EXISTS_MESSAGE));
        }

        let password_hash = self
            .passwords
            .hash(credentials.password())
            .await
            .map_err(map_password_hash_error)?;

        let user = User::new(UserId::random(), credentials.username().clone());
        let user_id = *user.id();
        self.users
            .create(&UserCredentials::new(user, password_hash))
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user_id, "user registered");
        Ok(())
    }
}

fn invalid_login() -> DomainError {
    DomainError::permission(INVALID_LOGIN_MESSAGE)
}
