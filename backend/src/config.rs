//! Server settings loaded via OrthoConfig.
//!
//! Values layer defaults, an optional config file, `TENDERS_*` environment
//! variables and command-line flags, in that order.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Settings controlling the listener and the optional database.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TENDERS")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub server_address: Option<String>,
    /// PostgreSQL connection URL. Absent means the in-memory store is used.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

impl AppSettings {
    /// Configured bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns the parse error when the configured address is malformed.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.server_address
            .as_deref()
            .unwrap_or(DEFAULT_SERVER_ADDRESS)
            .parse()
    }

    /// Configured database URL, ignoring blank values.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Configured pool size, falling back to 10.
    #[must_use]
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }
}
