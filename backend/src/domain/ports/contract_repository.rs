//! Port abstraction for contract persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Contract, ContractId, ContractSummary};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by contract repository adapters.
    pub enum ContractPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "contract repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "contract repository query failed: {message}",
    }
}

/// Contract creation, listing and point lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContractRepository: Send + Sync {
    /// Persist a new contract.
    async fn insert(&self, contract: &Contract) -> Result<(), ContractPersistenceError>;

    /// List every stored contract identifier. Order is unspecified.
    async fn list_ids(&self) -> Result<Vec<ContractSummary>, ContractPersistenceError>;

    /// Fetch a contract by identifier.
    async fn find_by_id(
        &self,
        id: &ContractId,
    ) -> Result<Option<Contract>, ContractPersistenceError>;
}
