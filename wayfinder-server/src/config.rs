//! Server settings: TOML file with command line overrides

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;
use wayfinder_core::prelude::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no navigation data: pass --data, --locations with --connections, or a [data] table")]
    MissingData,
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Command line of `wayfinder-server`
#[derive(Debug, Parser)]
#[command(name = "wayfinder-server", version, about = "Indoor navigation routing over HTTP")]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    #[arg(short, long)]
    pub port: Option<u16>,

    /// JSON navigation data with `nodes` and `edges`
    #[arg(long, conflicts_with_all = ["locations", "connections"])]
    pub data: Option<PathBuf>,

    /// Locations CSV table, requires --connections
    #[arg(long, requires = "connections")]
    pub locations: Option<PathBuf>,

    /// Connections CSV table, requires --locations
    #[arg(long, requires = "locations")]
    pub connections: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub max_concurrent_requests: usize,
    pub max_batch_size: usize,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 10,
            max_concurrent_requests: 64,
            max_batch_size: 256,
        }
    }
}

impl ListenConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ListenConfig,
    pub data: Option<NavDataSource>,
    pub routing: RoutingConfig,
}

impl ServerConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads a config file, relative data paths are resolved against its directory
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&text)?;
        if let Some(base) = path.parent()
            && let Some(data) = config.data.as_mut()
        {
            rebase(data, base);
        }
        Ok(config)
    }

    /// Loads the file named by `--config` (if any) and applies the remaining flags
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(path) = &cli.data {
            self.data = Some(NavDataSource::Json { path: path.clone() });
        } else if let (Some(locations), Some(connections)) = (&cli.locations, &cli.connections) {
            self.data = Some(NavDataSource::Csv {
                locations: locations.clone(),
                connections: connections.clone(),
            });
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.is_none() {
            return Err(ConfigError::MissingData);
        }
        if self.server.max_concurrent_requests == 0 {
            return Err(ConfigError::Invalid(
                "max_concurrent_requests must be at least 1".to_string(),
            ));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        self.routing
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Navigation data source, checked present by `validate`
    pub fn data_source(&self) -> Result<&NavDataSource, ConfigError> {
        self.data.as_ref().ok_or(ConfigError::MissingData)
    }
}

fn rebase(source: &mut NavDataSource, base: &Path) {
    let join = |path: &mut PathBuf| {
        if path.is_relative() {
            *path = base.join(&*path);
        }
    };
    match source {
        NavDataSource::Json { path } => join(path),
        NavDataSource::Csv {
            locations,
            connections,
        } => {
            join(locations);
            join(connections);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
        [server]
        port = 9000

        [data]
        format = "csv"
        locations = "locations.csv"
        connections = "connections.csv"

        [routing]
        floor_change_penalty = 250.0

        [routing.turn]
        min_angle = 20.0
    "#;

    #[test]
    fn parses_partial_file_with_defaults() {
        let config = ServerConfig::from_toml(SAMPLE).unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.routing.floor_change_penalty, 250.0);
        assert_eq!(config.routing.turn.min_angle, 20.0);
        assert_eq!(config.routing.turn.max_angle, 150.0);
        assert_eq!(config.routing.distance_scale, 10.0);
        assert_eq!(
            config.data,
            Some(NavDataSource::Csv {
                locations: "locations.csv".into(),
                connections: "connections.csv".into(),
            })
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn command_line_overrides_file() {
        let mut config = ServerConfig::from_toml(SAMPLE).unwrap();
        let cli = Cli::parse_from([
            "wayfinder-server",
            "--host",
            "0.0.0.0",
            "--port",
            "3000",
            "--data",
            "building.json",
        ]);
        config.apply(&cli);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(
            config.data,
            Some(NavDataSource::Json {
                path: "building.json".into()
            })
        );
    }

    #[test]
    fn csv_flags_must_come_together() {
        let result = Cli::try_parse_from(["wayfinder-server", "--locations", "l.csv"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "wayfinder-server",
            "--locations",
            "l.csv",
            "--connections",
            "c.csv",
        ])
        .unwrap();
        let mut config = ServerConfig::default();
        config.apply(&cli);
        assert!(matches!(config.data, Some(NavDataSource::Csv { .. })));
    }

    #[test]
    fn missing_data_is_rejected() {
        let config = ServerConfig::default();
        assert!(matches!(config.validate(), Err(ConfigError::MissingData)));
    }

    #[test]
    fn invalid_routing_values_are_rejected() {
        let mut config = ServerConfig::from_toml(SAMPLE).unwrap();
        config.routing.distance_scale = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_data_format_fails_to_parse() {
        let text = "[data]\nformat = \"xml\"\npath = \"a.xml\"\n";
        assert!(matches!(
            ServerConfig::from_toml(text),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn relative_data_paths_follow_the_config_file() {
        let mut source = NavDataSource::Json {
            path: "campus.json".into(),
        };
        rebase(&mut source, Path::new("/etc/wayfinder"));
        assert_eq!(
            source,
            NavDataSource::Json {
                path: "/etc/wayfinder/campus.json".into()
            }
        );
    }
}
