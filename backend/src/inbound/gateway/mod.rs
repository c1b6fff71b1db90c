//! API Gateway proxy adapter.
//!
//! Purpose: turn one proxy event into one proxy response. Both the Lambda
//! runtime adapter and the local HTTP server feed events through the same
//! [`Pipeline`], so behaviour is identical in either host.
//!
//! Flow: [`Operation::route`] → [`RequestEnvelope::parse`] →
//! [`ValidationChain`] → handler → [`GatewayResponse`].

mod envelope;
mod event;
pub mod handlers;
mod operations;
mod pipeline;
mod response;
mod state;
pub mod validation;

pub use envelope::{AUTHORIZATION_HEADER, INVALID_TOKEN_MESSAGE, RequestEnvelope};
pub use event::{GatewayEvent, HttpContext, RequestContext};
pub use operations::Operation;
pub use pipeline::{Pipeline, ROUTE_NOT_FOUND_MESSAGE};
pub use response::{CONTENT_TYPE_HEADER, GatewayResponse, JSON_CONTENT_TYPE, status_for};
pub use state::{GatewayState, GatewayStatePorts};
pub use validation::{BAD_TOKEN_MESSAGE, ValidationChain, Validator};
