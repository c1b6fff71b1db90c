//! Domain primitives, ports and use cases.
//!
//! Purpose: define strongly typed entities and the login/registration and
//! contract use cases. Nothing here knows about the gateway envelope, the
//! Lambda runtime, or DynamoDB; those live in `inbound` and `outbound`.
//!
//! Public surface:
//! - `DomainError` / `ErrorKind`: closed failure taxonomy.
//! - `User`, `UserId`, `Username`, `UserCredentials`, `PasswordHash`.
//! - `Contract`, `ContractId`, `ContractSummary`, `NewContract`.
//! - `LoginCredentials`, `TokenPayload`, `AccessToken`.
//! - `AuthService`, `ContractService`: use cases built on [`ports`].

pub mod auth;
pub mod auth_service;
pub mod contract;
pub mod contract_service;
pub mod error;
mod error_mapping;
pub mod ports;
pub mod user;

pub use self::auth::{AccessToken, LoginCredentials, LoginValidationError, TokenPayload};
pub use self::auth_service::{AuthService, INVALID_LOGIN_MESSAGE};
pub use self::contract::{
    Contract, ContractId, ContractName, ContractSummary, ContractValidationError, NewContract,
    TemplateId,
};
pub use self::contract_service::{CONTRACT_NOT_FOUND_MESSAGE, ContractService};
pub use self::error::{DomainError, DomainErrorValidationError, ErrorKind};
pub use self::user::{PasswordHash, User, UserCredentials, UserId, UserValidationError, Username};

/// Result alias used by use cases and the request pipeline.
pub type DomainResult<T> = Result<T, DomainError>;
