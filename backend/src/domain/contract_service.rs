//! Contract creation, listing and lookup use case.

use std::sync::Arc;

use tracing::info;

use super::error_mapping::map_contract_persistence_error;
use super::ports::ContractRepository;
use super::{Contract, ContractId, ContractSummary, DomainError, NewContract};

/// Message returned when a contract id has no record.
pub const CONTRACT_NOT_FOUND_MESSAGE: &str = "Contract Not Found";

/// Orchestrates contract operations over a [`ContractRepository`].
#[derive(Clone)]
pub struct ContractService {
    contracts: Arc<dyn ContractRepository>,
}

impl ContractService {
    /// Build the service over a contract store.
    pub fn new(contracts: Arc<dyn ContractRepository>) -> Self {
        Self { contracts }
    }

    /// Persist a new contract under a freshly generated identifier.
    ///
    /// Names are not checked for uniqueness.
    pub async fn create_contract(&self, draft: NewContract) -> Result<ContractId, DomainError> {
        let id = ContractId::random();
        let contract = Contract::from_draft(id, draft);
        self.contracts
            .insert(&contract)
            .await
            .map_err(map_contract_persistence_error)?;
        info!(contract_id = %id, user_id = %contract.user_id(), "contract created");
        Ok(id)
    }

    /// List every stored contract identifier as returned by the store.
    pub async fn list_contracts(&self) -> Result<Vec<ContractSummary>, DomainError> {
        self.contracts
            .list_ids()
            .await
            .map_err(map_contract_persistence_error)
    }

    /// Fetch one contract.
    ///
    /// # Errors
    /// [`ErrorKind::NotFound`](super::ErrorKind::NotFound) when no contract
    /// has the given identifier.
    pub async fn get_contract(&self, id: &ContractId) -> Result<Contract, DomainError> {
        self.contracts
            .find_by_id(id)
            .await
            .map_err(map_contract_persistence_error)?
            .ok_or_else(|| DomainError::not_found(CONTRACT_NOT_FOUND_MESSAGE))
    }
}
