//! Inbound adapters that translate host invocations into domain calls while
//! keeping runtime details at the edge.
//!
//! [`gateway`] holds the transport-neutral proxy pipeline. [`lambda`] and
//! [`http`] are the two hosts that feed it.

pub mod gateway;
pub mod http;
pub mod lambda;
