//! Local entry-point: serves the request pipeline over plain HTTP.

mod server;

use std::io;

use mockable::DefaultEnv;
use ortho_config::OrthoConfig;

use contracts_manager::config::AppConfig;
use contracts_manager::state_builders::build_pipeline;
use contracts_manager::telemetry;

use server::{ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    telemetry::init();

    let settings = ServerSettings::load().map_err(|e| io::Error::other(e.to_string()))?;
    let config = AppConfig::from_env(&DefaultEnv::new()).map_err(io::Error::other)?;
    let pipeline = build_pipeline(&config).await;

    create_server(&settings, pipeline)?.await
}
