//! Contracts manager backend library modules.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod state_builders;
pub mod telemetry;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
