//! DynamoDB client construction for managed and local endpoints.

use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::Credentials;
use tracing::info;

use crate::config::{StoreEndpoint, StoreSettings};

/// Region name DynamoDB Local accepts for offline use.
const LOCAL_REGION: &str = "localhost";

/// Build a client for the configured endpoint.
///
/// The managed endpoint resolves region and credentials from the ambient AWS
/// configuration. The local endpoint uses a fixed region and static dummy
/// credentials, which DynamoDB Local ignores.
pub async fn connect(settings: &StoreSettings) -> Client {
    let loader = aws_config::defaults(BehaviorVersion::latest());
    let sdk_config = match &settings.endpoint {
        StoreEndpoint::Managed => loader.load().await,
        StoreEndpoint::Local { url } => {
            info!(endpoint = %url, "using local DynamoDB endpoint");
            loader
                .region(Region::new(LOCAL_REGION))
                .endpoint_url(url)
                .credentials_provider(Credentials::new("local", "local", None, None, "static"))
                .load()
                .await
        }
    };
    Client::new(&sdk_config)
}
