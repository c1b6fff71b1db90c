//! Local server construction.

mod config;

pub use config::ServerSettings;

use actix_web::dev::Server;
use actix_web::{HttpServer, web};
use tracing::info;

use contracts_manager::inbound::gateway::Pipeline;
use contracts_manager::inbound::http::build_app;

/// Bind the local server that emulates the gateway in front of the pipeline.
pub fn create_server(settings: &ServerSettings, pipeline: Pipeline) -> std::io::Result<Server> {
    let data = web::Data::new(pipeline);
    let (host, port) = settings.bind_addr();
    let server = HttpServer::new(move || build_app(data.clone()))
        .bind((host.as_str(), port))?
        .run();
    info!(%host, port, "local server listening");
    Ok(server)
}
