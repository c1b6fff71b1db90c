//! Normalised view of one inbound request.
//!
//! Parsing lower-cases header names, decodes the body into a JSON object,
//! defaults absent query parameters to an empty map, and verifies a bearer
//! token when one is presented. A token that fails verification is rejected
//! here, before any operation-specific validator runs. An absent token only
//! leaves the identity slot empty.

use std::collections::HashMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::ports::TokenService;
use crate::domain::{DomainError, TokenPayload};

use super::GatewayEvent;

pub const AUTHORIZATION_HEADER: &str = "authorization";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

/// Request data shared by validators and handlers. Immutable once parsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestEnvelope {
    headers: HashMap<String, String>,
    body: Map<String, Value>,
    query: HashMap<String, String>,
    identity: Option<TokenPayload>,
}

impl RequestEnvelope {
    /// Parse `event`, verifying any bearer token with `tokens`.
    ///
    /// # Errors
    /// - `Validation` when a body is present but is not a JSON object.
    /// - `Permission` when a bearer token is present but does not verify.
    pub fn parse(event: &GatewayEvent, tokens: &dyn TokenService) -> Result<Self, DomainError> {
        let mut envelope = Self {
            headers: normalise_headers(event.headers.as_ref()),
            body: decode_body(event.body.as_deref(), event.is_base64_encoded)?,
            query: event.query_string_parameters.clone().unwrap_or_default(),
            identity: None,
        };

        if let Some(token) = envelope.header(AUTHORIZATION_HEADER).and_then(bearer_token) {
            let payload = tokens.verify(token).map_err(|err| {
                debug!(error = %err, "bearer token rejected");
                DomainError::permission(INVALID_TOKEN_MESSAGE)
            })?;
            envelope.identity = Some(payload);
        }

        Ok(envelope)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn query(&self) -> &HashMap<String, String> {
        &self.query
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Verified caller identity, if a valid bearer token was presented.
    pub fn identity(&self) -> Option<&TokenPayload> {
        self.identity.as_ref()
    }
}

fn normalise_headers(raw: Option<&HashMap<String, String>>) -> HashMap<String, String> {
    raw.into_iter()
        .flatten()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.clone()))
        .collect()
}

/// Token is the second space-separated segment of the header value.
fn bearer_token(value: &str) -> Option<&str> {
    value.split(' ').nth(1).filter(|token| !token.is_empty())
}

fn decode_body(raw: Option<&str>, base64_encoded: bool) -> Result<Map<String, Value>, DomainError> {
    let Some(raw) = raw else {
        return Ok(Map::new());
    };

    let bytes = if base64_encoded {
        STANDARD
            .decode(raw.trim())
            .map_err(|err| DomainError::validation(format!("Malformed request body: {err}")))?
    } else {
        raw.as_bytes().to_vec()
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(DomainError::validation("Request body must be a JSON object")),
        Err(err) => Err(DomainError::validation(format!(
            "Malformed request body: {err}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    //! Header, body and bearer-token parsing.
    use super::*;
    use crate::domain::ports::{MockTokenService, TokenError};
    use crate::domain::{ErrorKind, UserId};
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn no_tokens() -> MockTokenService {
        let mut tokens = MockTokenService::new();
        tokens.expect_verify().never();
        tokens
    }

    #[rstest]
    fn headers_are_case_insensitive(no_tokens: MockTokenService) {
        let event = GatewayEvent::new("POST", "/login").with_header("Content-TYPE", "text/plain");
        let envelope = RequestEnvelope::parse(&event, &no_tokens).expect("parses");
        assert_eq!(envelope.header("content-type"), Some("text/plain"));
        assert_eq!(envelope.header("CONTENT-TYPE"), Some("text/plain"));
    }

    #[rstest]
    fn absent_parts_default_to_empty(no_tokens: MockTokenService) {
        let envelope =
            RequestEnvelope::parse(&GatewayEvent::new("GET", "/getContractIDs"), &no_tokens)
                .expect("parses");
        assert!(envelope.body().is_empty());
        assert!(envelope.query().is_empty());
        assert!(envelope.identity().is_none());
    }

    #[rstest]
    #[case("")]
    #[case("  \n")]
    fn blank_body_is_empty_object(no_tokens: MockTokenService, #[case] body: &str) {
        let event = GatewayEvent::new("POST", "/login").with_body(body);
        let envelope = RequestEnvelope::parse(&event, &no_tokens).expect("parses");
        assert!(envelope.body().is_empty());
    }

    #[rstest]
    fn json_body_is_decoded(no_tokens: MockTokenService) {
        let event = GatewayEvent::new("POST", "/login").with_body(r#"{"username":"alice"}"#);
        let envelope = RequestEnvelope::parse(&event, &no_tokens).expect("parses");
        assert_eq!(envelope.body().get("username"), Some(&json!("alice")));
    }

    #[rstest]
    fn base64_body_is_decoded(no_tokens: MockTokenService) {
        let encoded = STANDARD.encode(r#"{"username":"alice"}"#);
        let event = GatewayEvent::new("POST", "/login").with_base64_body(encoded);
        let envelope = RequestEnvelope::parse(&event, &no_tokens).expect("parses");
        assert_eq!(envelope.body().get("username"), Some(&json!("alice")));
    }

    #[rstest]
    #[case(r#"{"username":"#)]
    #[case("[1, 2]")]
    #[case("\"alice\"")]
    fn malformed_or_non_object_body_is_validation(
        no_tokens: MockTokenService,
        #[case] body: &str,
    ) {
        let event = GatewayEvent::new("POST", "/login").with_body(body);
        let err = RequestEnvelope::parse(&event, &no_tokens).expect_err("rejected");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[rstest]
    fn invalid_base64_is_validation(no_tokens: MockTokenService) {
        let event = GatewayEvent::new("POST", "/login").with_base64_body("%%%");
        let err = RequestEnvelope::parse(&event, &no_tokens).expect_err("rejected");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[rstest]
    fn valid_bearer_token_populates_identity() {
        let payload = TokenPayload::new(UserId::random());
        let mut tokens = MockTokenService::new();
        tokens
            .expect_verify()
            .withf(|token| token.to_string() == "abc.def.ghi")
            .times(1)
            .returning(move |_| Ok(payload));

        let event = GatewayEvent::new("GET", "/getContractIDs")
            .with_header("Authorization", "Bearer abc.def.ghi");
        let envelope = RequestEnvelope::parse(&event, &tokens).expect("parses");
        assert_eq!(envelope.identity(), Some(&payload));
    }

    #[rstest]
    #[case("Bearer")]
    #[case("Bearer ")]
    #[case("")]
    fn missing_token_segment_leaves_identity_empty(
        no_tokens: MockTokenService,
        #[case] header: &str,
    ) {
        let event =
            GatewayEvent::new("GET", "/getContractIDs").with_header("authorization", header);
        let envelope = RequestEnvelope::parse(&event, &no_tokens).expect("parses");
        assert!(envelope.identity().is_none());
    }

    #[rstest]
    fn rejected_token_is_permission_failure() {
        let mut tokens = MockTokenService::new();
        tokens
            .expect_verify()
            .returning(|_| Err(TokenError::Expired));

        let event = GatewayEvent::new("GET", "/getContractIDs")
            .with_header("authorization", "Bearer stale");
        let err = RequestEnvelope::parse(&event, &tokens).expect_err("rejected");
        assert_eq!(err.kind(), ErrorKind::Permission);
        assert_eq!(err.message(), INVALID_TOKEN_MESSAGE);
    }
}
