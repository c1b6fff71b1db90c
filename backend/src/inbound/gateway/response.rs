//! Gateway proxy response and domain error mapping.
//!
//! Success: `{"success":true,"data":{..}}`. Failure:
//! `{"success":false,"error":"<Kind>Error","message":".."}`. Every response
//! is JSON with status 200, 400, 401, 404 or 500.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, warn};

use crate::domain::{DomainError, ErrorKind};

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";
const REDACTED_MESSAGE: &str = "Internal server error";
const FALLBACK_BODY: &str =
    r#"{"success":false,"error":"UnknownError","message":"Internal server error"}"#;

/// Proxy integration response returned to the function host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

#[derive(Serialize)]
struct SuccessBody<'a> {
    success: bool,
    data: &'a Map<String, Value>,
}

#[derive(Serialize)]
struct FailureBody<'a> {
    success: bool,
    error: &'static str,
    message: &'a str,
}

/// HTTP status for an error kind.
pub const fn status_for(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::Validation => 400,
        ErrorKind::Permission => 401,
        ErrorKind::NotFound => 404,
        ErrorKind::Unknown => 500,
    }
}

impl GatewayResponse {
    /// Wrap a handler payload in the success envelope.
    pub fn success(data: &Map<String, Value>) -> Self {
        Self::json(
            200,
            &SuccessBody {
                success: true,
                data,
            },
        )
    }

    /// Log `err` and map it to a failure response.
    ///
    /// `Unknown` messages are replaced with a generic one; the original is
    /// only written to the log.
    pub fn failure(err: &DomainError) -> Self {
        let kind = err.kind();
        let message = match kind {
            ErrorKind::Unknown => {
                error!(error_kind = kind.name(), detail = err.message(), "request failed");
                REDACTED_MESSAGE
            }
            _ => {
                warn!(error_kind = kind.name(), detail = err.message(), "request rejected");
                err.message()
            }
        };
        Self::json(
            status_for(kind),
            &FailureBody {
                success: false,
                error: kind.name(),
                message,
            },
        )
    }

    fn json(status_code: u16, body: &impl Serialize) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => Self::with_json_body(status_code, body),
            Err(err) => {
                error!(error = %err, "failed to serialise response body");
                Self::with_json_body(500, FALLBACK_BODY.to_owned())
            }
        }
    }

    fn with_json_body(status_code: u16, body: String) -> Self {
        Self {
            status_code,
            headers: BTreeMap::from([(
                CONTENT_TYPE_HEADER.to_owned(),
                JSON_CONTENT_TYPE.to_owned(),
            )]),
            body,
        }
    }

    /// Parse the body back into JSON.
    pub fn json_body(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
