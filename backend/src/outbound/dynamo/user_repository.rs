//! DynamoDB-backed `UserRepository` keyed by username.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserCredentials, Username};

use super::errors::user_error;
use super::items::{self, Item, USERNAME};

/// Users table adapter.
#[derive(Clone)]
pub struct DynamoUserRepository {
    client: Client,
    table: String,
}

impl DynamoUserRepository {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    async fn get_item(&self, username: &Username) -> Result<Option<Item>, UserPersistenceError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(USERNAME, items::s(username.as_ref()))
            .send()
            .await
            .map_err(user_error)?;
        Ok(output.item().cloned())
    }
}

fn decode_failure(error: items::ItemError) -> UserPersistenceError {
    UserPersistenceError::query(format!("malformed user item: {error}"))
}

#[async_trait]
impl UserRepository for DynamoUserRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.get_item(username)
            .await?
            .map(|item| items::user_from_item(&item).map_err(decode_failure))
            .transpose()
    }

    async fn find_credentials_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        self.get_item(username)
            .await?
            .map(|item| items::user_credentials_from_item(&item).map_err(decode_failure))
            .transpose()
    }

    async fn create(&self, credentials: &UserCredentials) -> Result<(), UserPersistenceError> {
        let username = credentials.user().username();
        let result = self
            .client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(items::user_credentials_to_item(credentials)))
            .condition_expression("attribute_not_exists(#username)")
            .expression_attribute_names("#username", USERNAME)
            .send()
            .await;

        match result {
            Ok(_) => {
                debug!(%username, "user item written");
                Ok(())
            }
            Err(err) if is_conditional_check_failure(&err) => {
                Err(UserPersistenceError::duplicate(username.as_ref()))
            }
            Err(err) => Err(user_error(err)),
        }
    }
}

fn is_conditional_check_failure<R>(error: &SdkError<PutItemError, R>) -> bool {
    error
        .as_service_error()
        .is_some_and(PutItemError::is_conditional_check_failed_exception)
}
