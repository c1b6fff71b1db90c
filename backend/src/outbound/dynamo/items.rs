//! Item layouts for the users and contracts tables.
//!
//! Every attribute is stored as a DynamoDB string (`S`).

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use crate::domain::{
    Contract, ContractId, ContractName, ContractSummary, PasswordHash, TemplateId, User,
    UserCredentials, UserId, Username,
};

pub(super) type Item = HashMap<String, AttributeValue>;

pub(super) const USER_ID: &str = "id";
pub(super) const USERNAME: &str = "username";
pub(super) const PASSWORD: &str = "password";

pub(super) const CONTRACT_ID: &str = "contractID";
pub(super) const CONTRACT_USER_ID: &str = "userID";
pub(super) const CONTRACT_NAME: &str = "contractName";
pub(super) const TEMPLATE_ID: &str = "templateID";

/// A stored item that does not match the expected layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(super) enum ItemError {
    #[error("attribute {0} is missing or not a string")]
    Missing(&'static str),
    #[error("attribute {name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

fn string_attr<'a>(item: &'a Item, name: &'static str) -> Result<&'a str, ItemError> {
    item.get(name)
        .and_then(|value| value.as_s().ok())
        .map(String::as_str)
        .ok_or(ItemError::Missing(name))
}

fn parsed_attr<T, E: std::fmt::Display>(
    item: &Item,
    name: &'static str,
    parse: impl FnOnce(String) -> Result<T, E>,
) -> Result<T, ItemError> {
    parse(string_attr(item, name)?.to_owned()).map_err(|err| ItemError::Invalid {
        name,
        reason: err.to_string(),
    })
}

pub(super) fn s(value: impl Into<String>) -> AttributeValue {
    AttributeValue::S(value.into())
}

pub(super) fn user_credentials_to_item(credentials: &UserCredentials) -> Item {
    let user = credentials.user();
    HashMap::from([
        (USER_ID.to_owned(), s(user.id().to_string())),
        (USERNAME.to_owned(), s(user.username().as_ref())),
        (PASSWORD.to_owned(), s(credentials.password_hash().as_ref())),
    ])
}

pub(super) fn user_from_item(item: &Item) -> Result<User, ItemError> {
    let id = parsed_attr(item, USER_ID, UserId::new)?;
    let username = parsed_attr(item, USERNAME, Username::new)?;
    Ok(User::new(id, username))
}

pub(super) fn user_credentials_from_item(item: &Item) -> Result<UserCredentials, ItemError> {
    let user = user_from_item(item)?;
    let hash = string_attr(item, PASSWORD)?;
    Ok(UserCredentials::new(user, PasswordHash::new(hash)))
}

pub(super) fn contract_to_item(contract: &Contract) -> Item {
    HashMap::from([
        (CONTRACT_ID.to_owned(), s(contract.id().to_string())),
        (CONTRACT_USER_ID.to_owned(), s(contract.user_id().to_string())),
        (CONTRACT_NAME.to_owned(), s(contract.name().as_ref())),
        (TEMPLATE_ID.to_owned(), s(contract.template_id().as_ref())),
    ])
}

pub(super) fn contract_from_item(item: &Item) -> Result<Contract, ItemError> {
    Ok(Contract::new(
        parsed_attr(item, CONTRACT_ID, ContractId::new)?,
        parsed_attr(item, CONTRACT_USER_ID, UserId::new)?,
        parsed_attr(item, CONTRACT_NAME, ContractName::new)?,
        parsed_attr(item, TEMPLATE_ID, TemplateId::new)?,
    ))
}

pub(super) fn contract_summary_from_item(item: &Item) -> Result<ContractSummary, ItemError> {
    Ok(ContractSummary {
        contract_id: parsed_attr(item, CONTRACT_ID, ContractId::new)?,
    })
}

#[cfg(test)]
mod tests {
    //! Attribute-map conversions for stored records.
    use super::*;
    use rstest::rstest;

    fn credentials() -> UserCredentials {
        UserCredentials::new(
            User::new(
                UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id"),
                Username::new("alice").expect("valid username"),
            ),
            PasswordHash::new("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"),
        )
    }

    #[rstest]
    fn user_item_uses_table_attribute_names() {
        let item = user_credentials_to_item(&credentials());
        assert_eq!(item.get(USERNAME), Some(&s("alice")));
        assert_eq!(
            item.get(USER_ID),
            Some(&s("3fa85f64-5717-4562-b3fc-2c963f66afa6"))
        );
        assert!(item.contains_key(PASSWORD));
    }

    #[rstest]
    fn user_item_decodes_back_to_credentials() {
        let original = credentials();
        let decoded = user_credentials_from_item(&user_credentials_to_item(&original))
            .expect("item decodes");
        assert_eq!(decoded, original);
    }

    #[rstest]
    fn identity_projection_ignores_password() {
        let mut item = user_credentials_to_item(&credentials());
        item.remove(PASSWORD);
        let user = user_from_item(&item).expect("identity decodes");
        assert_eq!(user.username().as_ref(), "alice");
        assert_eq!(
            user_credentials_from_item(&item),
            Err(ItemError::Missing(PASSWORD))
        );
    }

    #[rstest]
    fn non_string_attribute_is_missing() {
        let mut item = user_credentials_to_item(&credentials());
        item.insert(USER_ID.to_owned(), AttributeValue::N("7".to_owned()));
        assert_eq!(user_from_item(&item), Err(ItemError::Missing(USER_ID)));
    }

    #[rstest]
    fn malformed_contract_id_is_invalid() {
        let item = HashMap::from([(CONTRACT_ID.to_owned(), s("not-a-uuid"))]);
        assert!(matches!(
            contract_summary_from_item(&item),
            Err(ItemError::Invalid {
                name: CONTRACT_ID,
                ..
            })
        ));
    }

    #[rstest]
    fn contract_item_decodes_back_to_contract() {
        let contract = Contract::new(
            ContractId::random(),
            UserId::random(),
            ContractName::new("Contract 1").expect("valid name"),
            TemplateId::new("template123").expect("valid template"),
        );
        let item = contract_to_item(&contract);
        assert_eq!(item.get(CONTRACT_NAME), Some(&s("Contract 1")));
        assert_eq!(contract_from_item(&item).expect("decodes"), contract);
        assert_eq!(
            contract_summary_from_item(&item).expect("summary"),
            ContractSummary::from(&contract)
        );
    }
}
