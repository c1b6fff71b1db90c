//! Mapping from port failures to domain errors.
//!
//! Collaborator failures surface as [`ErrorKind::Unknown`]; the only port
//! error with business meaning is a duplicate username.
//!
//! [`ErrorKind::Unknown`]: super::ErrorKind::Unknown

use super::DomainError;
use super::ports::{ContractPersistenceError, PasswordHashError, TokenError, UserPersistenceError};

pub(crate) const USER_EXISTS_MESSAGE: &str = "User already exists";

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> DomainError {
    match error {
        UserPersistenceError::Duplicate { .. } => DomainError::validation(USER_EXISTS_MESSAGE),
        other => DomainError::unknown(other.to_string()),
    }
}

pub(crate) fn map_contract_persistence_error(error: ContractPersistenceError) -> DomainError {
    DomainError::unknown(error.to_string())
}

pub(crate) fn map_password_hash_error(error: PasswordHashError) -> DomainError {
    DomainError::unknown(error.to_string())
}

pub(crate) fn map_token_issue_error(error: TokenError) -> DomainError {
    DomainError::unknown(error.to_string())
}
