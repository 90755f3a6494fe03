//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::render::DEFAULT_NO_RESULTS_TEXT;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// PostgreSQL connection URL. When set, content is served from
    /// PostgreSQL instead of the in-memory store.
    pub database_url: Option<String>,

    /// Maximum database connections in pool (default: 10).
    pub database_max_connections: u32,

    /// Fixture file seeding content types, taxonomies and (without a
    /// database) the in-memory items.
    pub fixtures_path: Option<PathBuf>,

    /// Message rendered when a selection matches nothing.
    pub no_results_text: String,

    /// Per-query statement timeout for PostgreSQL (default: 10).
    pub statement_timeout_secs: u64,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            database_url: None,
            database_max_connections: 10,
            fixtures_path: None,
            no_results_text: DEFAULT_NO_RESULTS_TEXT.to_string(),
            statement_timeout_secs: 10,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let fixtures_path = env::var("FIXTURES_PATH")
            .ok()
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        let no_results_text = env::var("NO_RESULTS_TEXT")
            .ok()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NO_RESULTS_TEXT.to_string());

        let statement_timeout_secs = env::var("STATEMENT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("STATEMENT_TIMEOUT_SECS must be a valid u64")?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        Ok(Self {
            port,
            database_url,
            database_max_connections,
            fixtures_path,
            no_results_text,
            statement_timeout_secs,
            cors_allowed_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_serve_memory_content_on_port_3000() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert!(config.database_url.is_none());
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.statement_timeout_secs, 10);
        assert_eq!(config.no_results_text, "No posts found matching your criteria.");
        assert_eq!(config.cors_allowed_origins, vec!["*".to_string()]);
    }
}
