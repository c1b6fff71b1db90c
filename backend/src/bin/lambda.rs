//! Function-hosting entry-point: one pipeline per cold start, one call per event.

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use mockable::DefaultEnv;
use serde_json::Value;

use contracts_manager::config::AppConfig;
use contracts_manager::inbound::lambda::handle_event;
use contracts_manager::state_builders::build_pipeline;
use contracts_manager::telemetry;

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();

    let config = AppConfig::from_env(&DefaultEnv::new())?;
    let pipeline = build_pipeline(&config).await;
    let pipeline = &pipeline;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_event(pipeline, event).await
    }))
    .await
}
