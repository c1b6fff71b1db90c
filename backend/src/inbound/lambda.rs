//! Lambda runtime adapter.
//!
//! Deserialises the raw invocation payload into a [`GatewayEvent`] and runs
//! it through the pipeline. Payloads that are not proxy events still get a
//! JSON failure response rather than a runtime error.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::warn;

use crate::domain::DomainError;
use crate::inbound::gateway::{GatewayEvent, GatewayResponse, Pipeline};

/// Handle one invocation.
pub async fn handle_event(
    pipeline: &Pipeline,
    event: LambdaEvent<Value>,
) -> Result<GatewayResponse, Error> {
    let (payload, context) = event.into_parts();
    let mut gateway_event = match serde_json::from_value::<GatewayEvent>(payload) {
        Ok(gateway_event) => gateway_event,
        Err(err) => {
            warn!(request_id = %context.request_id, error = %err, "payload is not a proxy event");
            return Ok(GatewayResponse::failure(&DomainError::validation(format!(
                "Malformed request: {err}"
            ))));
        }
    };
    if gateway_event.request_id().is_none() {
        gateway_event = gateway_event.with_request_id(context.request_id);
    }
    Ok(pipeline.handle(&gateway_event).await)
}
