//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Use cases depend only on these traits. Production adapters live under
//! `crate::outbound`; unit tests substitute `mockall` doubles and integration
//! tests use the in-memory adapters from `crate::test_support`.

mod macros;
pub(crate) use macros::define_port_error;

mod contract_repository;
mod password_hasher;
mod token_service;
mod user_repository;

#[cfg(test)]
pub use contract_repository::MockContractRepository;
pub use contract_repository::{ContractPersistenceError, ContractRepository};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
