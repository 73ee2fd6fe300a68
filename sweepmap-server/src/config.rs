//! Server configuration: command line flags on top of an optional TOML file.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Deserialize;
use sweepmap_core::ScheduleConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Parser)]
#[command(name = "sweepmap-server", version, about = "Street sweeping schedule map API")]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Address to listen on, overrides the configuration file
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Schedule CSV, overrides the configuration file
    #[arg(long)]
    pub csv: Option<PathBuf>,
    /// Pin "now" to an RFC 3339 instant instead of the system clock
    #[arg(long)]
    pub reference: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub server: ServerSettings,
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSettings {
    pub bind: SocketAddr,
    pub request_timeout_secs: u64,
    pub max_concurrent_requests: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            request_timeout_secs: 30,
            max_concurrent_requests: 64,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, BoxError> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {e}", path.display()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, BoxError> {
        let config: ServerConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Resolves the configuration file named on the command line and applies
    /// the flag overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self, BoxError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(bind) = cli.bind {
            config.server.bind = bind;
        }
        if let Some(csv) = &cli.csv {
            config.schedule.csv_path.clone_from(csv);
        }
        if config.server.max_concurrent_requests == 0 {
            return Err("max_concurrent_requests must be at least 1".into());
        }
        config.schedule.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweepmap_core::loading::RenderModeKind;

    #[test]
    fn toml_tables_map_to_settings() {
        let config = ServerConfig::from_toml(
            r#"
            [server]
            bind = "127.0.0.1:3000"
            request_timeout_secs = 5

            [schedule]
            csv_path = "data/Street_Sweeping_Schedule.csv"
            time_zone = "America/New_York"
            horizon_days = 45
            render_mode = "offset"
            offset_meters = 4.5
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.server.request_timeout_secs, 5);
        assert_eq!(config.server.max_concurrent_requests, 64);
        assert_eq!(config.schedule.horizon_days, 45);
        assert_eq!(config.schedule.time_zone, chrono_tz::America::New_York);
        assert_eq!(config.schedule.render_mode, RenderModeKind::Offset);
        assert!(config.schedule.disc.is_some());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ServerConfig::from_toml("[server]\nport = 80\n").is_err());
        assert!(ServerConfig::from_toml("[schedule]\ntime_zone = \"Mars/Olympus\"\n").is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let cli = Cli::parse_from([
            "sweepmap-server",
            "--bind",
            "127.0.0.1:9000",
            "--csv",
            "other.csv",
        ]);
        let config = ServerConfig::from_cli(&cli).unwrap();
        assert_eq!(config.server.bind.port(), 9000);
        assert_eq!(config.schedule.csv_path, PathBuf::from("other.csv"));
        assert!(cli.reference.is_none());
    }

    #[test]
    fn reference_instant_is_parsed() {
        let cli = Cli::parse_from(["sweepmap-server", "--reference", "2025-10-06T15:00:00Z"]);
        assert_eq!(cli.reference.unwrap().to_rfc3339(), "2025-10-06T15:00:00+00:00");
    }
}
