// Configuration module entry point
// Layered configuration loading and shared application state

mod state;
mod types;

use ::config::builder::{ConfigBuilder, DefaultState};
use ::config::{ConfigError, Environment, File};
use std::net::SocketAddr;

pub use state::AppState;
pub use types::{
    Config, HealthConfig, HttpConfig, LoggingConfig, PerformanceConfig, RegistryConfig,
    RoutesConfig, ServerConfig,
};

/// Environment variable prefix, e.g. `ACTIVITIES_SERVER__PORT=9000`
const ENV_PREFIX: &str = "ACTIVITIES";

impl Config {
    /// Load configuration from the given file path (extension optional)
    ///
    /// Sources, lowest priority first: built-in defaults, the file (if it
    /// exists), then `ACTIVITIES_*` environment variables.
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        Self::with_defaults()?
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Built-in defaults only, ignoring files and environment
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::with_defaults()?.build()?.try_deserialize()
    }

    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        ::config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "Mergington-Activities/1.0")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("routes.index_redirect", "/static/index.html")?
            .set_default("routes.static_prefix", "/static")?
            .set_default("routes.static_dir", "static")?
            .set_default("routes.index_files", vec!["index.html"])?
            .set_default("registry.enforce_capacity", false)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::defaults().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8000);
        assert!(cfg.server.workers.is_none());
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.routes.index_redirect, "/static/index.html");
        assert_eq!(cfg.routes.index_files, vec!["index.html"]);
        assert!(cfg.routes.health.enabled);
        assert_eq!(cfg.routes.health.liveness_path, "/healthz");
        assert!(!cfg.registry.enforce_capacity);
        assert!(cfg.registry.seed_file.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::defaults().unwrap();
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 8000);

        cfg.server.host = "not an ip".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("mergington-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9100\n\n[registry]\nenforce_capacity = true\n",
        )
        .unwrap();

        let cfg = Config::load_from(&path.to_string_lossy()).unwrap();
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert!(cfg.registry.enforce_capacity);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
