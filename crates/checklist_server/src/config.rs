//! Server configuration from command-line flags and environment.

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use checklist_core::default_log_level;
use clap::builder::BoolishValueParser;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Browser dev-server origins allowed by default.
pub const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://localhost:5174",
];

#[derive(Debug, Clone, Parser)]
#[command(name = "checklist-server", version, about = "REST backend for the task checklist")]
pub struct ServerConfig {
    /// SQLite database file; created on first start.
    #[arg(long, env = "CHECKLIST_DB_PATH", default_value = "tasks.db")]
    pub db_path: PathBuf,

    /// Address the HTTP listener binds to.
    #[arg(long, env = "CHECKLIST_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// trace|debug|info|warn|error; defaults by build mode.
    #[arg(long, env = "CHECKLIST_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files (default: ./logs).
    #[arg(long, env = "CHECKLIST_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Allowed CORS origin; repeat the flag or comma-separate values.
    #[arg(
        long = "cors-origin",
        env = "CHECKLIST_CORS_ORIGINS",
        value_delimiter = ',',
        default_values_t = DEFAULT_CORS_ORIGINS.map(String::from)
    )]
    pub cors_origins: Vec<String>,

    /// Skip inserting the default tasks into an empty database.
    #[arg(long, env = "CHECKLIST_NO_SEED", value_parser = BoolishValueParser::new())]
    pub no_seed: bool,
}

impl ServerConfig {
    pub fn seed_enabled(&self) -> bool {
        !self.no_seed
    }

    pub fn resolved_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }

    /// Returns the log directory as an absolute path.
    pub fn resolved_log_dir(&self) -> anyhow::Result<PathBuf> {
        let dir = self
            .log_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("logs"));
        if dir.is_absolute() {
            return Ok(dir);
        }
        let cwd = std::env::current_dir().context("failed to resolve working directory")?;
        Ok(cwd.join(dir))
    }

    /// Builds the CORS policy for the configured origins.
    pub fn cors_layer(&self) -> anyhow::Result<CorsLayer> {
        let origins = self
            .cors_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("invalid CORS origin `{origin}`"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any))
    }
}

#[cfg(test)]
mod tests {
    use super::{ServerConfig, DEFAULT_CORS_ORIGINS};
    use checklist_core::default_log_level;
    use clap::Parser;

    #[test]
    fn defaults_match_local_development_setup() {
        let config = ServerConfig::try_parse_from(["checklist-server"]).unwrap();
        assert_eq!(config.db_path.to_str(), Some("tasks.db"));
        assert_eq!(config.bind.port(), 8000);
        assert_eq!(config.cors_origins, DEFAULT_CORS_ORIGINS.map(String::from));
        assert!(config.seed_enabled());
    }

    #[test]
    fn cors_origins_accept_comma_separated_values() {
        let config = ServerConfig::try_parse_from([
            "checklist-server",
            "--cors-origin",
            "http://a.test,http://b.test",
            "--no-seed",
        ])
        .unwrap();
        assert_eq!(config.cors_origins, ["http://a.test", "http://b.test"]);
        assert!(!config.seed_enabled());
        assert!(config.cors_layer().is_ok());
    }

    #[test]
    fn log_level_falls_back_to_build_default() {
        let config = ServerConfig::try_parse_from(["checklist-server"]).unwrap();
        assert_eq!(config.resolved_log_level(), default_log_level());

        let config =
            ServerConfig::try_parse_from(["checklist-server", "--log-level", "warn"]).unwrap();
        assert_eq!(config.resolved_log_level(), "warn");
    }

    #[test]
    fn relative_log_dir_is_made_absolute() {
        let config =
            ServerConfig::try_parse_from(["checklist-server", "--log-dir", "var/log"]).unwrap();
        let dir = config.resolved_log_dir().unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("var/log"));
    }

    #[test]
    fn invalid_origin_is_rejected() {
        let config =
            ServerConfig::try_parse_from(["checklist-server", "--cors-origin", "bad\norigin"])
                .unwrap();
        assert!(config.cors_layer().is_err());
    }
}
