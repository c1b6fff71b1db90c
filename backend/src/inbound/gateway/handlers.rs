//! Operation handlers.
//!
//! ```text
//! POST /login          {"username":"alice","password":"pw1"} -> {"accessToken":"..."}
//! POST /register       {"username":"alice","password":"pw1"} -> {}
//! POST /createContract {"userID":"..","contractName":"..","templateID":".."} -> {"contractID":".."}
//! GET  /getContractIDs -> {"contractsIDs":[{"contractID":".."}]}
//! GET  /getContract?id=.. -> {"contractID":"..","userID":"..","contractName":"..","templateID":".."}
//! ```
//!
//! Handlers run after the validation chain, so request DTOs only fail to
//! decode when the domain rejects a value the schema let through.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{
    AccessToken, ContractId, ContractName, ContractSummary, DomainError, LoginCredentials,
    LoginValidationError, NewContract, TemplateId, UserId,
};

use super::{GatewayState, Operation, RequestEnvelope};

/// Body of `POST /login` and `POST /register`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<CredentialsRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: CredentialsRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Body of `POST /createContract`.
#[derive(Debug, Deserialize)]
pub struct CreateContractRequest {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "contractName")]
    pub contract_name: String,
    #[serde(rename = "templateID")]
    pub template_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: AccessToken,
}

#[derive(Debug, Serialize)]
pub struct CreateContractResponse {
    #[serde(rename = "contractID")]
    pub contract_id: ContractId,
}

#[derive(Debug, Serialize)]
pub struct ContractListResponse {
    #[serde(rename = "contractsIDs")]
    pub contracts_ids: Vec<ContractSummary>,
}

/// Run the handler for `operation` and return its success payload.
pub async fn dispatch(
    operation: Operation,
    envelope: &RequestEnvelope,
    state: &GatewayState,
) -> Result<Map<String, Value>, DomainError> {
    match operation {
        Operation::Login => {
            let credentials = credentials(envelope)?;
            let access_token = state.auth.login(&credentials).await?;
            to_payload(LoginResponse { access_token })
        }
        Operation::Register => {
            let credentials = credentials(envelope)?;
            state.auth.register(&credentials).await?;
            to_payload(())
        }
        Operation::CreateContract => {
            let request: CreateContractRequest = decode_body(envelope)?;
            let draft = NewContract {
                user_id: UserId::new(&request.user_id)
                    .map_err(|err| field_error("userID", err))?,
                name: ContractName::new(request.contract_name)
                    .map_err(|err| field_error("contractName", err))?,
                template_id: TemplateId::new(request.template_id)
                    .map_err(|err| field_error("templateID", err))?,
            };
            let contract_id = state.contracts.create_contract(draft).await?;
            to_payload(CreateContractResponse { contract_id })
        }
        Operation::ListContracts => {
            let contracts_ids = state.contracts.list_contracts().await?;
            to_payload(ContractListResponse { contracts_ids })
        }
        Operation::GetContract => {
            let raw = envelope.query_param("id").unwrap_or_default();
            let id = ContractId::new(raw).map_err(|err| field_error("id", err))?;
            let contract = state.contracts.get_contract(&id).await?;
            to_payload(contract)
        }
    }
}

fn credentials(envelope: &RequestEnvelope) -> Result<LoginCredentials, DomainError> {
    let request: CredentialsRequest = decode_body(envelope)?;
    LoginCredentials::try_from(request).map_err(|err| match err {
        LoginValidationError::EmptyUsername => field_error("username", err),
        LoginValidationError::EmptyPassword => field_error("password", err),
    })
}

fn decode_body<T: DeserializeOwned>(envelope: &RequestEnvelope) -> Result<T, DomainError> {
    serde_json::from_value(Value::Object(envelope.body().clone()))
        .map_err(|err| DomainError::validation(format!("Malformed request body: {err}")))
}

fn field_error(field: &str, reason: impl std::fmt::Display) -> DomainError {
    DomainError::validation(format!("{field} : {reason}"))
}

/// Serialise a handler result; unit and `null` become an empty object.
fn to_payload<T: Serialize>(value: T) -> Result<Map<String, Value>, DomainError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(Value::Null) => Ok(Map::new()),
        Ok(other) => Err(DomainError::unknown(format!(
            "handler returned a non-object payload: {other}"
        ))),
        Err(err) => Err(DomainError::unknown(format!(
            "failed to serialise handler payload: {err}"
        ))),
    }
}
