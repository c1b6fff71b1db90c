//! Process configuration parsing and validation.
//!
//! Centralises the environment-driven settings (token secret, token lifetime,
//! store endpoint and table names) so they are validated once at start-up and
//! can be tested in isolation with `mockable::MockEnv`. Business logic never
//! reads the environment; the values flow into adapters at construction.

use std::fmt;

use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

const ACCESS_TOKEN_SECRET_ENV: &str = "ACCESS_TOKEN_SECRET";
const ACCESS_TOKEN_TTL_DAYS_ENV: &str = "ACCESS_TOKEN_TTL_DAYS";
const IS_OFFLINE_ENV: &str = "IS_OFFLINE";
const DYNAMODB_ENDPOINT_ENV: &str = "DYNAMODB_ENDPOINT";
const USERS_TABLE_ENV: &str = "USERS_TABLE";
const CONTRACTS_TABLE_ENV: &str = "CONTRACTS_TABLE";

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const TTL_EXPECTED: &str = "an integer between 1 and 3650";

/// Token lifetime used when none is configured.
pub const DEFAULT_TOKEN_TTL_DAYS: u32 = 60;
const MAX_TOKEN_TTL_DAYS: u32 = 3650;

/// Local DynamoDB endpoint used when running offline.
pub const DEFAULT_LOCAL_ENDPOINT: &str = "http://localhost:5000";
pub const DEFAULT_USERS_TABLE: &str = "UsersTable";
pub const DEFAULT_CONTRACTS_TABLE: &str = "ContractsTable";

/// Errors raised while validating configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// HS256 signing secret. Zeroed on drop and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessTokenSecret(Zeroizing<String>);

impl AccessTokenSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for AccessTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessTokenSecret(<redacted>)")
    }
}

/// Token issuance settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSettings {
    pub secret: AccessTokenSecret,
    pub ttl_days: u32,
}

/// Which DynamoDB endpoint the adapters talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEndpoint {
    /// The managed service, resolved from the ambient AWS configuration.
    Managed,
    /// A local development store (e.g. DynamoDB Local).
    Local { url: String },
}

/// Key-value store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub endpoint: StoreEndpoint,
    pub users_table: String,
    pub contracts_table: String,
}

/// Validated process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub token: TokenSettings,
    pub store: StoreSettings,
}

impl AppConfig {
    /// Build configuration from environment variables.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use contracts_manager::config::{AppConfig, StoreEndpoint};
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "ACCESS_TOKEN_SECRET" => Some("s3cret".to_owned()),
    ///     "IS_OFFLINE" => Some("true".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let config = AppConfig::from_env(&env).unwrap();
    /// assert_eq!(config.token.ttl_days, 60);
    /// assert!(matches!(config.store.endpoint, StoreEndpoint::Local { .. }));
    /// ```
    pub fn from_env<E: Env>(env: &E) -> Result<Self, ConfigError> {
        Ok(Self {
            token: TokenSettings {
                secret: secret_from_env(env)?,
                ttl_days: ttl_days_from_env(env)?,
            },
            store: StoreSettings {
                endpoint: endpoint_from_env(env)?,
                users_table: table_from_env(env, USERS_TABLE_ENV, DEFAULT_USERS_TABLE),
                contracts_table: table_from_env(env, CONTRACTS_TABLE_ENV, DEFAULT_CONTRACTS_TABLE),
            },
        })
    }
}

fn secret_from_env<E: Env>(env: &E) -> Result<AccessTokenSecret, ConfigError> {
    match env.string(ACCESS_TOKEN_SECRET_ENV) {
        Some(value) if !value.trim().is_empty() => Ok(AccessTokenSecret::new(value)),
        _ => Err(ConfigError::MissingEnv {
            name: ACCESS_TOKEN_SECRET_ENV,
        }),
    }
}

fn ttl_days_from_env<E: Env>(env: &E) -> Result<u32, ConfigError> {
    let Some(value) = env.string(ACCESS_TOKEN_TTL_DAYS_ENV) else {
        return Ok(DEFAULT_TOKEN_TTL_DAYS);
    };
    match value.trim().parse::<u32>() {
        Ok(days) if (1..=MAX_TOKEN_TTL_DAYS).contains(&days) => Ok(days),
        _ => Err(ConfigError::InvalidEnv {
            name: ACCESS_TOKEN_TTL_DAYS_ENV,
            value,
            expected: TTL_EXPECTED,
        }),
    }
}

fn endpoint_from_env<E: Env>(env: &E) -> Result<StoreEndpoint, ConfigError> {
    let offline = match env.string(IS_OFFLINE_ENV) {
        Some(value) => parse_bool(&value).ok_or(ConfigError::InvalidEnv {
            name: IS_OFFLINE_ENV,
            value,
            expected: BOOL_EXPECTED,
        })?,
        None => false,
    };

    if !offline {
        if env.string(DYNAMODB_ENDPOINT_ENV).is_some() {
            warn!("DYNAMODB_ENDPOINT is ignored unless IS_OFFLINE is enabled");
        }
        return Ok(StoreEndpoint::Managed);
    }

    let url = env
        .string(DYNAMODB_ENDPOINT_ENV)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOCAL_ENDPOINT.to_owned());
    Ok(StoreEndpoint::Local { url })
}

fn table_from_env<E: Env>(env: &E, name: &str, default: &str) -> String {
    env.string(name)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_owned())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
