use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_GRAPH_PATH: &str = "data/adjacency.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 64;

#[derive(Parser, Debug, Default)]
#[command(
    name = "foxroute-server",
    version,
    about = "Road routing API for the Foxhole map viewer"
)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to listen on (overrides the config file)
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Adjacency document produced by `foxroute compile`
    #[arg(long)]
    pub graph: Option<PathBuf>,

    /// Load the road graph at startup instead of on the first query
    #[arg(long)]
    pub preload: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub graph_path: PathBuf,
    pub request_timeout_secs: u64,
    pub concurrency_limit: usize,
    pub preload: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8080))),
            graph_path: PathBuf::from(DEFAULT_GRAPH_PATH),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
            preload: false,
        }
    }
}

impl ServerConfig {
    /// Config file values (or defaults) with command line overrides applied
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(bind) = cli.bind {
            config.bind = bind;
        }
        if let Some(graph) = &cli.graph {
            config.graph_path.clone_from(graph);
        }
        config.preload |= cli.preload;

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.request_timeout_secs > 0,
            "request_timeout_secs must be positive"
        );
        anyhow::ensure!(
            self.concurrency_limit > 0,
            "concurrency_limit must be positive"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let config = ServerConfig::load(&Cli::default()).unwrap();
        assert_eq!(config.bind, DEFAULT_BIND.parse().unwrap());
        assert_eq!(config.graph_path, PathBuf::from(DEFAULT_GRAPH_PATH));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(!config.preload);
    }

    #[test]
    fn file_values_and_cli_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foxroute.toml");
        std::fs::write(
            &path,
            "bind = \"0.0.0.0:9000\"\ngraph_path = \"/srv/roads.json\"\nconcurrency_limit = 8\n",
        )
        .unwrap();

        let cli = Cli {
            config: Some(path),
            graph: Some(PathBuf::from("override.json")),
            preload: true,
            ..Cli::default()
        };
        let config = ServerConfig::load(&cli).unwrap();

        assert_eq!(config.bind, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(config.graph_path, PathBuf::from("override.json"));
        assert_eq!(config.concurrency_limit, 8);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert!(config.preload);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foxroute.toml");
        std::fs::write(&path, "listen = \"0.0.0.0:9000\"\n").unwrap();

        assert!(ServerConfig::from_file(&path).is_err());
    }

    #[test]
    fn zero_limits_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foxroute.toml");
        std::fs::write(&path, "concurrency_limit = 0\n").unwrap();

        let cli = Cli {
            config: Some(path),
            ..Cli::default()
        };
        assert!(ServerConfig::load(&cli).is_err());
    }
}
