//! Wiring of production adapters into the request pipeline.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;

use crate::config::AppConfig;
use crate::inbound::gateway::{GatewayState, GatewayStatePorts, Pipeline};
use crate::outbound::crypto::{Argon2PasswordHasher, JwtTokenService};
use crate::outbound::dynamo::{DynamoContractRepository, DynamoUserRepository, connect};

/// Build the pipeline backed by DynamoDB, Argon2 and HS256 tokens.
///
/// Called once per process; the result is shared across invocations.
pub async fn build_pipeline(config: &AppConfig) -> Pipeline {
    let client = connect(&config.store).await;
    info!(
        users_table = %config.store.users_table,
        contracts_table = %config.store.contracts_table,
        token_ttl_days = config.token.ttl_days,
        "pipeline configured"
    );

    Pipeline::new(GatewayState::new(GatewayStatePorts {
        users: Arc::new(DynamoUserRepository::new(
            client.clone(),
            &config.store.users_table,
        )),
        passwords: Arc::new(Argon2PasswordHasher),
        tokens: Arc::new(JwtTokenService::new(&config.token, Arc::new(DefaultClock))),
        contracts: Arc::new(DynamoContractRepository::new(
            client,
            &config.store.contracts_table,
        )),
    }))
}
