//! Contract data model.
//!
//! Contracts are immutable once created. The wire shape keeps the field names
//! clients already use (`contractID`, `userID`, `contractName`, `templateID`).

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Validation errors returned by the contract value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractValidationError {
    InvalidId,
    EmptyName,
    EmptyTemplateId,
}

impl fmt::Display for ContractValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "contract id must be a valid UUID"),
            Self::EmptyName => write!(f, "contract name must not be empty"),
            Self::EmptyTemplateId => write!(f, "template id must not be empty"),
        }
    }
}

impl std::error::Error for ContractValidationError {}

/// Contract identifier generated at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContractId(Uuid);

impl ContractId {
    /// Parse a contract identifier.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ContractValidationError> {
        let id = id.as_ref();
        if id.trim() != id {
            return Err(ContractValidationError::InvalidId);
        }
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| ContractValidationError::InvalidId)
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<ContractId> for String {
    fn from(value: ContractId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for ContractId {
    type Error = ContractValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

macro_rules! non_empty_text {
    ($(#[$meta:meta])* $name:ident, $error:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap the value; blank input is rejected.
            pub fn new(value: impl Into<String>) -> Result<Self, ContractValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err($error);
                }
                Ok(Self(value))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ContractValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

non_empty_text!(
    /// Human-readable contract name. Names may repeat across contracts.
    ContractName,
    ContractValidationError::EmptyName
);

non_empty_text!(
    /// Identifier of the template a contract was created from.
    TemplateId,
    ContractValidationError::EmptyTemplateId
);

/// Caller-supplied fields for a contract that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContract {
    pub user_id: UserId,
    pub name: ContractName,
    pub template_id: TemplateId,
}

/// Stored contract record.
///
/// # Examples
/// ```
/// use contracts_manager::domain::{Contract, ContractId, ContractName, TemplateId, UserId};
///
/// let contract = Contract::new(
///     ContractId::random(),
///     UserId::random(),
///     ContractName::new("Lease").unwrap(),
///     TemplateId::new("tpl-1").unwrap(),
/// );
/// let json = serde_json::to_value(&contract).unwrap();
/// assert_eq!(json["contractName"], "Lease");
/// assert!(json.get("contractID").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    #[serde(rename = "contractID")]
    id: ContractId,
    #[serde(rename = "userID")]
    user_id: UserId,
    #[serde(rename = "contractName")]
    name: ContractName,
    #[serde(rename = "templateID")]
    template_id: TemplateId,
}

impl Contract {
    /// Build a contract from validated parts.
    pub fn new(
        id: ContractId,
        user_id: UserId,
        name: ContractName,
        template_id: TemplateId,
    ) -> Self {
        Self {
            id,
            user_id,
            name,
            template_id,
        }
    }

    /// Attach a generated identifier to a draft.
    pub fn from_draft(id: ContractId, draft: NewContract) -> Self {
        let NewContract {
            user_id,
            name,
            template_id,
        } = draft;
        Self::new(id, user_id, name, template_id)
    }

    /// Contract identifier.
    pub fn id(&self) -> &ContractId {
        &self.id
    }

    /// Owning user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Display name.
    pub fn name(&self) -> &ContractName {
        &self.name
    }

    /// Template the contract was created from.
    pub fn template_id(&self) -> &TemplateId {
        &self.template_id
    }
}

/// Listing projection of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractSummary {
    #[serde(rename = "contractID")]
    pub contract_id: ContractId,
}

impl From<&Contract> for ContractSummary {
    fn from(value: &Contract) -> Self {
        Self {
            contract_id: value.id,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("contract123")]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    fn contract_id_rejects_malformed_values(#[case] raw: &str) {
        assert_eq!(ContractId::new(raw), Err(ContractValidationError::InvalidId));
    }

    #[rstest]
    fn blank_name_and_template_are_rejected() {
        assert_eq!(ContractName::new("  "), Err(ContractValidationError::EmptyName));
        assert_eq!(
            TemplateId::new(""),
            Err(ContractValidationError::EmptyTemplateId)
        );
    }

    #[rstest]
    fn summary_uses_contract_id_field() {
        let id = ContractId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
        let value =
            serde_json::to_value(ContractSummary { contract_id: id }).expect("serialise summary");
        assert_eq!(
            value,
            serde_json::json!({ "contractID": "3fa85f64-5717-4562-b3fc-2c963f66afa6" })
        );
    }

    #[rstest]
    fn from_draft_keeps_caller_fields() {
        let draft = NewContract {
            user_id: UserId::random(),
            name: ContractName::new("Contract 1").expect("name"),
            template_id: TemplateId::new("template123").expect("template"),
        };
        let id = ContractId::random();
        let contract = Contract::from_draft(id, draft.clone());
        assert_eq!(contract.id(), &id);
        assert_eq!(contract.user_id(), &draft.user_id);
        assert_eq!(contract.name(), &draft.name);
        assert_eq!(contract.template_id(), &draft.template_id);
    }
}
