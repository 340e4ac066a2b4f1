//! Server configuration.
//!
//! Values come from command-line flags, falling back to environment
//! variables (a `.env` file is loaded at startup), then to the defaults
//! below.

use clap::Args;

use bookstock_contracts::DEFAULT_SERVICE_ROOT;

pub const DEFAULT_PORT: u16 = 3000;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://bookstock.db?mode=rwc";

/// Default `tracing` filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "bookstock=info,tower_http=info";

#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Port to listen on
    #[arg(short, long, env = "BOOKSTOCK_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// SQLite connection URL
    #[arg(long, env = "BOOKSTOCK_DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Path prefix of the catalog routes
    #[arg(long, env = "BOOKSTOCK_SERVICE_ROOT", default_value = DEFAULT_SERVICE_ROOT)]
    pub service_root: String,
}

impl ServerConfig {
    /// Service root with a leading slash and no trailing one.
    pub fn normalized_service_root(&self) -> String {
        normalize_root(&self.service_root)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            service_root: DEFAULT_SERVICE_ROOT.to_string(),
        }
    }
}

pub(crate) fn normalize_root(root: &str) -> String {
    let trimmed = root.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_root() {
        assert_eq!(normalize_root("/odata/v4/catalog/"), "/odata/v4/catalog");
        assert_eq!(normalize_root("catalog"), "/catalog");
        assert_eq!(normalize_root("/"), "");
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.normalized_service_root(), "/odata/v4/catalog");
    }
}
