//! Fail-fast request validation.
//!
//! A [`ValidationChain`] is an ordered list of [`Validator`]s evaluated over
//! an immutable [`RequestEnvelope`]. The first failure aborts the chain.
//! Schemas are static per operation: a list of fields, each with the
//! constraints it must satisfy.

use serde_json::Value;
use uuid::Uuid;

use crate::domain::DomainError;

use super::RequestEnvelope;

pub const BAD_TOKEN_MESSAGE: &str = "Bad token";

/// A single check applied to a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Value is a JSON string.
    IsString,
    /// Value is present, not null and not the empty string.
    NotEmpty,
    /// Value is a string holding a well-formed UUID.
    IsUuid,
}

impl Constraint {
    fn check(self, value: Option<&Value>) -> bool {
        match self {
            Self::IsString => matches!(value, Some(Value::String(_))),
            Self::NotEmpty => match value {
                None | Some(Value::Null) => false,
                Some(Value::String(text)) => !text.is_empty(),
                Some(_) => true,
            },
            Self::IsUuid => matches!(
                value,
                Some(Value::String(text)) if Uuid::parse_str(text).is_ok()
            ),
        }
    }

    fn reason(self, field: &str) -> String {
        match self {
            Self::IsString => format!("{field} must be a string"),
            Self::NotEmpty => format!("{field} should not be empty"),
            Self::IsUuid => format!("{field} must be a UUID"),
        }
    }
}

/// Constraints for one named field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub constraints: &'static [Constraint],
}

impl FieldRule {
    /// Every constraint the value violates, in declaration order.
    fn violations(&self, value: Option<&Value>) -> Vec<String> {
        self.constraints
            .iter()
            .filter(|constraint| !constraint.check(value))
            .map(|constraint| constraint.reason(self.name))
            .collect()
    }
}

/// Static request shape for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub fields: &'static [FieldRule],
}

impl Schema {
    /// Check fields in order and report the first one that fails.
    ///
    /// The message lists every violated constraint of that field as
    /// `"<field> : <reason>, <reason>"`.
    pub fn check(&self, lookup: impl Fn(&str) -> Option<Value>) -> Result<(), DomainError> {
        for rule in self.fields {
            let value = lookup(rule.name);
            let violations = rule.violations(value.as_ref());
            if !violations.is_empty() {
                return Err(DomainError::validation(format!(
                    "{} : {}",
                    rule.name,
                    violations.join(", ")
                )));
            }
        }
        Ok(())
    }
}

/// One step of a [`ValidationChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// The envelope must carry a verified identity.
    IdentityRequired,
    /// The decoded body must satisfy the schema.
    Body(&'static Schema),
    /// The query parameters must satisfy the schema.
    Query(&'static Schema),
}

impl Validator {
    pub fn validate(&self, envelope: &RequestEnvelope) -> Result<(), DomainError> {
        match self {
            Self::IdentityRequired => envelope
                .identity()
                .map(|_| ())
                .ok_or_else(|| DomainError::permission(BAD_TOKEN_MESSAGE)),
            Self::Body(schema) => schema.check(|name| envelope.body().get(name).cloned()),
            Self::Query(schema) => schema.check(|name| {
                envelope
                    .query_param(name)
                    .map(|value| Value::String(value.to_owned()))
            }),
        }
    }
}

/// Ordered validators run strictly in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationChain {
    validators: Vec<Validator>,
}

impl ValidationChain {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Run every validator until one fails.
    pub fn validate(&self, envelope: &RequestEnvelope) -> Result<(), DomainError> {
        self.validators
            .iter()
            .try_for_each(|validator| validator.validate(envelope))
    }
}

#[cfg(test)]
mod tests {
    //! Constraint semantics and chain ordering.
    use super::*;
    use crate::domain::ports::MockTokenService;
    use crate::domain::{ErrorKind, TokenPayload, UserId};
    use crate::inbound::gateway::GatewayEvent;
    use rstest::rstest;
    use serde_json::json;

    static NAME_SCHEMA: Schema = Schema {
        fields: &[
            FieldRule {
                name: "username",
                constraints: &[Constraint::NotEmpty, Constraint::IsString],
            },
            FieldRule {
                name: "password",
                constraints: &[Constraint::NotEmpty, Constraint::IsString],
            },
        ],
    };

    static ID_SCHEMA: Schema = Schema {
        fields: &[FieldRule {
            name: "id",
            constraints: &[Constraint::NotEmpty, Constraint::IsUuid],
        }],
    };

    fn envelope(event: GatewayEvent, identity: Option<TokenPayload>) -> RequestEnvelope {
        let mut tokens = MockTokenService::new();
        tokens
            .expect_verify()
            .returning(move |_| identity.ok_or(crate::domain::ports::TokenError::Expired));
        let event = if identity.is_some() {
            event.with_header("authorization", "Bearer token")
        } else {
            event
        };
        RequestEnvelope::parse(&event, &tokens).expect("envelope parses")
    }

    fn body_envelope(body: serde_json::Value) -> RequestEnvelope {
        envelope(
            GatewayEvent::new("POST", "/login").with_body(body.to_string()),
            None,
        )
    }

    #[rstest]
    #[case(Constraint::IsString, json!("x"), true)]
    #[case(Constraint::IsString, json!(7), false)]
    #[case(Constraint::NotEmpty, json!(""), false)]
    #[case(Constraint::NotEmpty, json!(0), true)]
    #[case(Constraint::NotEmpty, json!(null), false)]
    #[case(Constraint::IsUuid, json!("3fa85f64-5717-4562-b3fc-2c963f66afa6"), true)]
    #[case(Constraint::IsUuid, json!("user-1"), false)]
    fn constraints_check_values(
        #[case] constraint: Constraint,
        #[case] value: serde_json::Value,
        #[case] expected: bool,
    ) {
        assert_eq!(constraint.check(Some(&value)), expected);
    }

    #[rstest]
    fn conforming_body_passes() {
        let envelope = body_envelope(json!({ "username": "alice", "password": "pw1" }));
        assert!(Validator::Body(&NAME_SCHEMA).validate(&envelope).is_ok());
    }

    #[rstest]
    fn missing_field_lists_every_violation() {
        let envelope = body_envelope(json!({ "password": "pw1" }));
        let err = Validator::Body(&NAME_SCHEMA)
            .validate(&envelope)
            .expect_err("username missing");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            err.message(),
            "username : username should not be empty, username must be a string"
        );
    }

    #[rstest]
    fn first_failing_field_is_reported() {
        let envelope = body_envelope(json!({ "username": 5, "password": "" }));
        let err = Validator::Body(&NAME_SCHEMA)
            .validate(&envelope)
            .expect_err("both invalid");
        assert_eq!(err.message(), "username : username must be a string");
    }

    #[rstest]
    fn query_schema_checks_parameters() {
        let bad = envelope(
            GatewayEvent::new("GET", "/getContract").with_query("id", "nope"),
            None,
        );
        let err = Validator::Query(&ID_SCHEMA)
            .validate(&bad)
            .expect_err("not a uuid");
        assert_eq!(err.message(), "id : id must be a UUID");

        let good = envelope(
            GatewayEvent::new("GET", "/getContract")
                .with_query("id", "3fa85f64-5717-4562-b3fc-2c963f66afa6"),
            None,
        );
        assert!(Validator::Query(&ID_SCHEMA).validate(&good).is_ok());
    }

    #[rstest]
    fn identity_required_rejects_anonymous_envelope() {
        let err = Validator::IdentityRequired
            .validate(&body_envelope(json!({})))
            .expect_err("anonymous");
        assert_eq!(err.kind(), ErrorKind::Permission);
        assert_eq!(err.message(), BAD_TOKEN_MESSAGE);
    }

    #[rstest]
    fn chain_stops_at_first_failure() {
        let chain = ValidationChain::new()
            .with(Validator::IdentityRequired)
            .with(Validator::Body(&NAME_SCHEMA));

        let err = chain
            .validate(&body_envelope(json!({})))
            .expect_err("anonymous and malformed");
        assert_eq!(err.kind(), ErrorKind::Permission);

        let authed = envelope(
            GatewayEvent::new("POST", "/login").with_body("{}"),
            Some(TokenPayload::new(UserId::random())),
        );
        let err = chain.validate(&authed).expect_err("malformed body");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[rstest]
    fn empty_chain_accepts_anything() {
        assert!(ValidationChain::new()
            .validate(&body_envelope(json!({ "anything": true })))
            .is_ok());
    }
}
