//! DynamoDB-backed `ContractRepository` keyed by contract identifier.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;

use crate::domain::ports::{ContractPersistenceError, ContractRepository};
use crate::domain::{Contract, ContractId, ContractSummary};

use super::errors::contract_error;
use super::items::{self, CONTRACT_ID, Item};

/// Contracts table adapter.
#[derive(Clone)]
pub struct DynamoContractRepository {
    client: Client,
    table: String,
}

impl DynamoContractRepository {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

fn decode_failure(error: items::ItemError) -> ContractPersistenceError {
    ContractPersistenceError::query(format!("malformed contract item: {error}"))
}

#[async_trait]
impl ContractRepository for DynamoContractRepository {
    async fn insert(&self, contract: &Contract) -> Result<(), ContractPersistenceError> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(items::contract_to_item(contract)))
            .send()
            .await
            .map(|_| ())
            .map_err(contract_error)
    }

    async fn list_ids(&self) -> Result<Vec<ContractSummary>, ContractPersistenceError> {
        let mut summaries = Vec::new();
        let mut start_key: Option<Item> = None;
        loop {
            let page = self
                .client
                .scan()
                .table_name(&self.table)
                .projection_expression(CONTRACT_ID)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(contract_error)?;

            for item in page.items() {
                summaries.push(items::contract_summary_from_item(item).map_err(decode_failure)?);
            }

            match page.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }
        Ok(summaries)
    }

    async fn find_by_id(
        &self,
        id: &ContractId,
    ) -> Result<Option<Contract>, ContractPersistenceError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(CONTRACT_ID, items::s(id.to_string()))
            .send()
            .await
            .map_err(contract_error)?;
        output
            .item()
            .map(|item| items::contract_from_item(item).map_err(decode_failure))
            .transpose()
    }
}
