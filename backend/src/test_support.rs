//! Test utilities for the backend crate.
//!
//! In-memory port adapters and a pipeline builder shared by unit tests (in
//! `src/`) and integration tests (in `tests/`). Compiled for tests and when
//! the `test-support` feature is enabled.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mockable::DefaultClock;

use crate::config::{AccessTokenSecret, DEFAULT_TOKEN_TTL_DAYS, TokenSettings};
use crate::domain::ports::{
    ContractPersistenceError, ContractRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{Contract, ContractId, ContractSummary, User, UserCredentials, Username};
use crate::inbound::gateway::{GatewayState, GatewayStatePorts, Pipeline};
use crate::outbound::crypto::{Argon2PasswordHasher, JwtTokenService};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Users keyed by username. Rejects duplicate inserts like a conditional put.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, UserCredentials>>,
}

impl InMemoryUserRepository {
    /// Stored record for `username`, including the password hash.
    pub fn stored(&self, username: &str) -> Option<UserCredentials> {
        lock(&self.users).get(username).cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.users).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(lock(&self.users)
            .get(username.as_ref())
            .map(|credentials| credentials.user().clone()))
    }

    async fn find_credentials_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        Ok(lock(&self.users).get(username.as_ref()).cloned())
    }

    async fn create(&self, credentials: &UserCredentials) -> Result<(), UserPersistenceError> {
        let username = credentials.user().username().as_ref().to_owned();
        let mut users = lock(&self.users);
        if users.contains_key(&username) {
            return Err(UserPersistenceError::duplicate(username));
        }
        users.insert(username, credentials.clone());
        Ok(())
    }
}

/// Contracts in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryContractRepository {
    contracts: Mutex<Vec<Contract>>,
}

impl InMemoryContractRepository {
    pub fn len(&self) -> usize {
        lock(&self.contracts).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ContractRepository for InMemoryContractRepository {
    async fn insert(&self, contract: &Contract) -> Result<(), ContractPersistenceError> {
        lock(&self.contracts).push(contract.clone());
        Ok(())
    }

    async fn list_ids(&self) -> Result<Vec<ContractSummary>, ContractPersistenceError> {
        Ok(lock(&self.contracts)
            .iter()
            .map(ContractSummary::from)
            .collect())
    }

    async fn find_by_id(
        &self,
        id: &ContractId,
    ) -> Result<Option<Contract>, ContractPersistenceError> {
        Ok(lock(&self.contracts)
            .iter()
            .find(|contract| contract.id() == id)
            .cloned())
    }
}

/// Pipeline wired to in-memory stores with real hashing and signing.
pub struct TestHarness {
    pub pipeline: Pipeline,
    pub users: Arc<InMemoryUserRepository>,
    pub contracts: Arc<InMemoryContractRepository>,
    pub tokens: Arc<JwtTokenService>,
}

impl TestHarness {
    pub const SECRET: &'static str = "test-access-token-secret";

    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let contracts = Arc::new(InMemoryContractRepository::default());
        let tokens = Arc::new(JwtTokenService::new(
            &TokenSettings {
                secret: AccessTokenSecret::new(Self::SECRET),
                ttl_days: DEFAULT_TOKEN_TTL_DAYS,
            },
            Arc::new(DefaultClock),
        ));
        let pipeline = Pipeline::new(GatewayState::new(GatewayStatePorts {
            users: users.clone(),
            passwords: Arc::new(Argon2PasswordHasher),
            tokens: tokens.clone(),
            contracts: contracts.clone(),
        }));
        Self {
            pipeline,
            users,
            contracts,
            tokens,
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
