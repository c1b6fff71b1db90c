//! Local HTTP server settings loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

/// Bind settings for the local development server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONTRACTS_SERVER")]
pub struct ServerSettings {
    /// Interface to bind.
    #[ortho_config(default = String::from(DEFAULT_HOST))]
    pub host: String,
    /// Port to listen on.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
}

impl ServerSettings {
    /// Address tuple accepted by `HttpServer::bind`.
    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("contracts-manager")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env([
            ("CONTRACTS_SERVER_HOST", None::<String>),
            ("CONTRACTS_SERVER_PORT", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.host, DEFAULT_HOST);
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(
            settings.bind_addr(),
            (DEFAULT_HOST.to_owned(), DEFAULT_PORT)
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CONTRACTS_SERVER_HOST", Some("0.0.0.0".to_owned())),
            ("CONTRACTS_SERVER_PORT", Some("8080".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), ("0.0.0.0".to_owned(), 8080));
    }
}
