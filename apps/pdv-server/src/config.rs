//! Server configuration module.
//!
//! Configuration is layered: built-in defaults, then an optional `pdv.toml`
//! in the working directory, then `PDV_*` environment variables.
//!
//! | Key             | Env var             | Default   |
//! |-----------------|---------------------|-----------|
//! | `bind_addr`     | `PDV_BIND_ADDR`     | `0.0.0.0` |
//! | `http_port`     | `PDV_HTTP_PORT`     | `5000`    |
//! | `seed_fixtures` | `PDV_SEED_FIXTURES` | `true`    |

use std::net::{IpAddr, SocketAddr};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_HTTP_PORT: u16 = 5000;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to listen on
    pub bind_addr: String,

    /// HTTP port
    pub http_port: u16,

    /// Load the demo users, catalog and sales at startup
    pub seed_fixtures: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            seed_fixtures: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `pdv.toml` (if present) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let source = Config::builder()
            .add_source(File::with_name("pdv").required(false))
            .add_source(Environment::with_prefix("PDV").try_parsing(true));
        Self::from_builder(source)
    }

    /// Applies defaults underneath whatever sources the builder already has.
    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let config: ServerConfig = builder
            .set_default("bind_addr", DEFAULT_BIND_ADDR)?
            .set_default("http_port", i64::from(DEFAULT_HTTP_PORT))?
            .set_default("seed_fixtures", true)?
            .build()?
            .try_deserialize()?;

        config.socket_addr()?;
        Ok(config)
    }

    /// The address the HTTP listener binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .bind_addr
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PDV_BIND_ADDR".to_string()))?;
        Ok(SocketAddr::new(ip, self.http_port))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),
}
