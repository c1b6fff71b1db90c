//! HS256 access tokens signed with a shared secret.
//!
//! Claims are `{ id, iat, exp }`. Expiry is checked against the injected
//! [`Clock`] rather than the system time so tests can pin "now".

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::config::TokenSettings;
use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{AccessToken, TokenPayload, UserId};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: String,
    iat: i64,
    exp: i64,
}

/// `TokenService` backed by `jsonwebtoken`.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    pub fn new(settings: &TokenSettings, clock: Arc<dyn Clock>) -> Self {
        let secret = settings.secret.as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::days(i64::from(settings.ttl_days)),
            clock,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared against the injected clock below.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);
        validation
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, payload: &TokenPayload) -> Result<AccessToken, TokenError> {
        let now = self.clock.utc();
        let claims = Claims {
            id: payload.id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<TokenPayload, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Self::validation())
            .map_err(|err| TokenError::invalid(err.to_string()))?;
        if data.claims.exp <= self.clock.utc().timestamp() {
            return Err(TokenError::Expired);
        }
        let id = UserId::new(&data.claims.id).map_err(|err| TokenError::invalid(err.to_string()))?;
        Ok(TokenPayload::new(id))
    }
}
