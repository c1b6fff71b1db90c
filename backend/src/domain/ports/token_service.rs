//! Port for issuing and verifying signed access tokens.
use crate::domain::{AccessToken, TokenPayload};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// The token could not be signed.
        Signing { message: String } => "access token signing failed: {message}",
        /// Signature, format or claims are invalid.
        Invalid { message: String } => "access token is invalid: {message}",
        /// The token is past its expiry.
        Expired => "access token has expired",
    }
}

/// Tamper-evident tokens carrying a [`TokenPayload`] and an expiry.
///
/// Signing is CPU-bound and cheap, so the port is synchronous.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign a token for `payload` using the configured validity window.
    fn issue(&self, payload: &TokenPayload) -> Result<AccessToken, TokenError>;

    /// Verify signature and expiry and return the embedded payload.
    fn verify(&self, token: &str) -> Result<TokenPayload, TokenError>;
}
