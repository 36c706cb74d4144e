//! Lantern server configuration — resolution, deserialization, and validation.
//!
//! All knobs are merged into one immutable [`ServeConfig`] at startup and
//! passed by reference into the server. Request handlers never read ambient
//! process state themselves.

use crate::error::LanternError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Fallback port when neither flag, `PORT` env var, nor config file names one.
pub const DEFAULT_PORT: u16 = 3000;

/// Fallback bind address.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Immutable runtime configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub host: String,
    pub port: u16,
    /// Directory static assets are served from.
    pub root: PathBuf,
    /// Env-definition file re-read on every `/env.json` request.
    pub env_file: PathBuf,
}

/// Optional on-disk configuration, parsed from `lantern.toml`.
///
/// Every field is optional; the setup tooling that writes this file may emit
/// any subset of keys.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub root: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

/// Command-line overrides, filled in by the CLI. Highest precedence.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub root: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

impl ServeConfig {
    /// Merge all configuration sources into a concrete config.
    ///
    /// Port precedence: CLI flag → `PORT` env var → config file → 3000.
    /// The env-definition file defaults to `.env` inside the serving root.
    pub fn resolve(file: FileConfig, overrides: Overrides) -> crate::Result<Self> {
        let port = match overrides.port {
            Some(port) => port,
            None => match port_from_env()? {
                Some(port) => port,
                None => file.port.unwrap_or(DEFAULT_PORT),
            },
        };
        let host = overrides
            .host
            .or(file.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let root = overrides
            .root
            .or(file.root)
            .unwrap_or_else(|| PathBuf::from("."));
        let env_file = overrides
            .env_file
            .or(file.env_file)
            .unwrap_or_else(|| root.join(".env"));

        Ok(Self {
            host,
            port,
            root,
            env_file,
        })
    }

    /// Validate the config, failing fast on misconfigurations before the
    /// listening socket is bound.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.root.is_dir() {
            return Err(LanternError::InvalidConfig(format!(
                "root directory '{}' does not exist",
                self.root.display()
            )));
        }
        Ok(())
    }

    /// `host:port` string for the TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Read and parse a `lantern.toml` config file.
pub async fn load_file_config(path: &Path) -> crate::Result<FileConfig> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        LanternError::InvalidConfig(format!("failed to read {}: {}", path.display(), e))
    })?;
    toml::from_str(&contents).map_err(|e| {
        LanternError::InvalidConfig(format!("failed to parse {}: {}", path.display(), e))
    })
}

/// Read the external `PORT` setting, if present.
fn port_from_env() -> crate::Result<Option<u16>> {
    match std::env::var("PORT") {
        Ok(raw) => parse_port(&raw).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_port(raw: &str) -> crate::Result<u16> {
    raw.trim()
        .parse()
        .map_err(|_| LanternError::InvalidPort(raw.to_string()))
}
