//! Static routing table and per-operation request schemas.
//!
//! | Operation | Route | Identity | Schema |
//! |---|---|---|---|
//! | Login | `POST /login` | no | body: username, password |
//! | Register | `POST /register` | no | body: username, password |
//! | CreateContract | `POST /createContract` | yes | body: userID, contractName, templateID |
//! | ListContracts | `GET /getContractIDs` | yes | none |
//! | GetContract | `GET /getContract` | yes | query: id |

use super::validation::{Constraint, FieldRule, Schema, ValidationChain, Validator};

const REQUIRED_STRING: &[Constraint] = &[Constraint::NotEmpty, Constraint::IsString];
const REQUIRED_UUID: &[Constraint] = &[Constraint::NotEmpty, Constraint::IsUuid];

static CREDENTIALS_SCHEMA: Schema = Schema {
    fields: &[
        FieldRule {
            name: "username",
            constraints: REQUIRED_STRING,
        },
        FieldRule {
            name: "password",
            constraints: REQUIRED_STRING,
        },
    ],
};

static CREATE_CONTRACT_SCHEMA: Schema = Schema {
    fields: &[
        FieldRule {
            name: "userID",
            constraints: REQUIRED_UUID,
        },
        FieldRule {
            name: "contractName",
            constraints: REQUIRED_STRING,
        },
        FieldRule {
            name: "templateID",
            constraints: REQUIRED_STRING,
        },
    ],
};

static CONTRACT_QUERY_SCHEMA: Schema = Schema {
    fields: &[FieldRule {
        name: "id",
        constraints: REQUIRED_UUID,
    }],
};

/// Every operation the pipeline can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    Register,
    CreateContract,
    ListContracts,
    GetContract,
}

impl Operation {
    pub const ALL: [Self; 5] = [
        Self::Login,
        Self::Register,
        Self::CreateContract,
        Self::ListContracts,
        Self::GetContract,
    ];

    /// Resolve an operation from the request method and path.
    ///
    /// Only the final path segment is compared, so stage prefixes such as
    /// `/dev/login` resolve like `/login`. Methods compare case-insensitively.
    pub fn route(method: &str, path: &str) -> Option<Self> {
        let segment = path.trim_end_matches('/').rsplit('/').next()?;
        Self::ALL.into_iter().find(|operation| {
            operation.method().eq_ignore_ascii_case(method)
                && operation.path().trim_start_matches('/') == segment
        })
    }

    pub const fn method(self) -> &'static str {
        match self {
            Self::Login | Self::Register | Self::CreateContract => "POST",
            Self::ListContracts | Self::GetContract => "GET",
        }
    }

    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::CreateContract => "/createContract",
            Self::ListContracts => "/getContractIDs",
            Self::GetContract => "/getContract",
        }
    }

    /// Name used in logs and spans.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::CreateContract => "create_contract",
            Self::ListContracts => "list_contracts",
            Self::GetContract => "get_contract",
        }
    }

    pub const fn requires_identity(self) -> bool {
        matches!(
            self,
            Self::CreateContract | Self::ListContracts | Self::GetContract
        )
    }

    pub fn body_schema(self) -> Option<&'static Schema> {
        match self {
            Self::Login | Self::Register => Some(&CREDENTIALS_SCHEMA),
            Self::CreateContract => Some(&CREATE_CONTRACT_SCHEMA),
            Self::ListContracts | Self::GetContract => None,
        }
    }

    pub fn query_schema(self) -> Option<&'static Schema> {
        match self {
            Self::GetContract => Some(&CONTRACT_QUERY_SCHEMA),
            _ => None,
        }
    }

    /// Validators for this operation: identity first, then schemas.
    pub fn validation_chain(self) -> ValidationChain {
        let mut chain = ValidationChain::new();
        if self.requires_identity() {
            chain = chain.with(Validator::IdentityRequired);
        }
        if let Some(schema) = self.body_schema() {
            chain = chain.with(Validator::Body(schema));
        }
        if let Some(schema) = self.query_schema() {
            chain = chain.with(Validator::Query(schema));
        }
        chain
    }
}
