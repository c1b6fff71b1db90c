//! Shared pipeline state.
//!
//! Handlers depend only on use cases and the token port, so the pipeline is
//! testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ContractRepository, PasswordHasher, TokenService, UserRepository};
use crate::domain::{AuthService, ContractService};

/// Parameter object bundling the port implementations the pipeline needs.
#[derive(Clone)]
pub struct GatewayStatePorts {
    pub users: Arc<dyn UserRepository>,
    pub passwords: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenService>,
    pub contracts: Arc<dyn ContractRepository>,
}

/// Dependency bundle for gateway handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub auth: AuthService,
    pub contracts: ContractService,
    pub tokens: Arc<dyn TokenService>,
}

impl GatewayState {
    pub fn new(ports: GatewayStatePorts) -> Self {
        let GatewayStatePorts {
            users,
            passwords,
            tokens,
            contracts,
        } = ports;
        Self {
            auth: AuthService::new(users, passwords, Arc::clone(&tokens)),
            contracts: ContractService::new(contracts),
            tokens,
        }
    }
}
