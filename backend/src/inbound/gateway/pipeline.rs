//! Request pipeline: route, parse, validate, dispatch, map.

use serde_json::{Map, Value};
use tracing::{Instrument, info_span};

use crate::domain::DomainError;

use super::handlers::dispatch;
use super::{GatewayEvent, GatewayResponse, GatewayState, Operation, RequestEnvelope};

pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Route not found";

/// Turns one raw event into one gateway response. Never fails.
#[derive(Clone)]
pub struct Pipeline {
    state: GatewayState,
}

impl Pipeline {
    pub fn new(state: GatewayState) -> Self {
        Self { state }
    }

    /// Handle one invocation inside a `request` span.
    pub async fn handle(&self, event: &GatewayEvent) -> GatewayResponse {
        let operation = Operation::route(
            event.method().unwrap_or_default(),
            event.request_path().unwrap_or_default(),
        );
        let span = info_span!(
            "request",
            operation = operation.map_or("unrouted", Operation::name),
            request_id = event.request_id().unwrap_or("-"),
        );

        async move {
            match self.process(operation, event).await {
                Ok(data) => GatewayResponse::success(&data),
                Err(err) => GatewayResponse::failure(&err),
            }
        }
        .instrument(span)
        .await
    }

    async fn process(
        &self,
        operation: Option<Operation>,
        event: &GatewayEvent,
    ) -> Result<Map<String, Value>, DomainError> {
        let operation =
            operation.ok_or_else(|| DomainError::not_found(ROUTE_NOT_FOUND_MESSAGE))?;
        let envelope = RequestEnvelope::parse(event, self.state.tokens.as_ref())?;
        operation.validation_chain().validate(&envelope)?;
        dispatch(operation, &envelope, &self.state).await
    }
}
