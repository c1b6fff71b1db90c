//! DynamoDB persistence adapters.
//!
//! Thin adapters over `aws-sdk-dynamodb` implementing the domain repository
//! ports. Item layouts live in [`items`] and never leak into the domain.
//!
//! Tables:
//! - users: partition key `username`; attributes `id`, `username`, `password`.
//! - contracts: partition key `contractID`; attributes `userID`,
//!   `contractName`, `templateID`.
//!
//! # Example
//!
//! ```ignore
//! let client = connect(&config.store).await;
//! let users = DynamoUserRepository::new(client.clone(), &config.store.users_table);
//! ```

mod client;
mod contract_repository;
mod errors;
mod items;
mod user_repository;

pub use client::connect;
pub use contract_repository::DynamoContractRepository;
pub use user_repository::DynamoUserRepository;
