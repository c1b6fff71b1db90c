//! Classification of SDK failures into port error variants.

use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};

use crate::domain::ports::{ContractPersistenceError, UserPersistenceError};

/// Whether the request never reached the store or timed out on the way.
pub(super) fn is_connection_failure<E, R>(error: &SdkError<E, R>) -> bool {
    matches!(
        error,
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_)
    )
}

pub(super) fn user_error<E, R>(error: SdkError<E, R>) -> UserPersistenceError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let message = DisplayErrorContext(&error).to_string();
    if is_connection_failure(&error) {
        UserPersistenceError::connection(message)
    } else {
        UserPersistenceError::query(message)
    }
}

pub(super) fn contract_error<E, R>(error: SdkError<E, R>) -> ContractPersistenceError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let message = DisplayErrorContext(&error).to_string();
    if is_connection_failure(&error) {
        ContractPersistenceError::connection(message)
    } else {
        ContractPersistenceError::query(message)
    }
}
