//! Raw API Gateway proxy event.
//!
//! Accepts both the REST API (v1) and HTTP API (v2) payload shapes. Only the
//! fields the pipeline reads are modelled; everything else is ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Inbound proxy event as delivered by the function host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    /// v1 method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,
    /// v1 resource path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// v2 path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_path: Option<String>,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_context: Option<RequestContext>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// v2 method and path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpContext>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpContext {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub path: String,
}

impl GatewayEvent {
    /// Start a v1-shaped event for `method` and `path`.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            http_method: Some(method.into()),
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Add a header, keeping the caller's casing.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Add a query-string parameter.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Attach a plain-text body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.is_base64_encoded = false;
        self
    }

    /// Attach a body that is already base64-encoded.
    #[must_use]
    pub fn with_base64_body(mut self, encoded: impl Into<String>) -> Self {
        self.body = Some(encoded.into());
        self.is_base64_encoded = true;
        self
    }

    /// Set the gateway request id.
    #[must_use]
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_context
            .get_or_insert_with(RequestContext::default)
            .request_id = Some(id.into());
        self
    }

    /// Request method, from the v1 field or the v2 request context.
    pub fn method(&self) -> Option<&str> {
        self.http_method.as_deref().or_else(|| {
            self.request_context
                .as_ref()
                .and_then(|ctx| ctx.http.as_ref())
                .map(|http| http.method.as_str())
        })
    }

    /// Request path, preferring the v1 field, then the v2 raw path.
    pub fn request_path(&self) -> Option<&str> {
        self.path
            .as_deref()
            .or(self.raw_path.as_deref())
            .or_else(|| {
                self.request_context
                    .as_ref()
                    .and_then(|ctx| ctx.http.as_ref())
                    .map(|http| http.path.as_str())
            })
    }

    /// Gateway request id, used to correlate logs.
    pub fn request_id(&self) -> Option<&str> {
        self.request_context
            .as_ref()
            .and_then(|ctx| ctx.request_id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    //! Payload shape coverage for both gateway versions.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn rest_api_payload_deserialises() {
        let event: GatewayEvent = serde_json::from_value(json!({
            "resource": "/login",
            "path": "/dev/login",
            "httpMethod": "POST",
            "headers": { "Content-Type": "application/json" },
            "queryStringParameters": null,
            "body": "{\"username\":\"alice\"}",
            "isBase64Encoded": false,
            "requestContext": { "requestId": "req-1", "stage": "dev" }
        }))
        .expect("v1 event");

        assert_eq!(event.method(), Some("POST"));
        assert_eq!(event.request_path(), Some("/dev/login"));
        assert_eq!(event.request_id(), Some("req-1"));
        assert!(event.query_string_parameters.is_none());
    }

    #[rstest]
    fn http_api_payload_deserialises() {
        let event: GatewayEvent = serde_json::from_value(json!({
            "version": "2.0",
            "routeKey": "GET /getContract",
            "rawPath": "/getContract",
            "rawQueryString": "id=1",
            "headers": { "authorization": "Bearer abc" },
            "queryStringParameters": { "id": "1" },
            "isBase64Encoded": false,
            "requestContext": {
                "requestId": "req-2",
                "http": { "method": "GET", "path": "/getContract" }
            }
        }))
        .expect("v2 event");

        assert_eq!(event.method(), Some("GET"));
        assert_eq!(event.request_path(), Some("/getContract"));
        assert!(event.body.is_none());
    }

    #[rstest]
    fn null_headers_are_accepted() {
        let event: GatewayEvent =
            serde_json::from_value(json!({ "httpMethod": "GET", "path": "/x", "headers": null }))
                .expect("null headers");
        assert!(event.headers.is_none());
    }

    #[rstest]
    fn builders_fill_optional_maps() {
        let event = GatewayEvent::new("GET", "/getContract")
            .with_header("Authorization", "Bearer t")
            .with_query("id", "42")
            .with_request_id("req-3");
        assert_eq!(
            event.headers.as_ref().and_then(|h| h.get("Authorization")),
            Some(&"Bearer t".to_owned())
        );
        assert_eq!(
            event
                .query_string_parameters
                .as_ref()
                .and_then(|q| q.get("id")),
            Some(&"42".to_owned())
        );
        assert_eq!(event.request_id(), Some("req-3"));
    }
}
