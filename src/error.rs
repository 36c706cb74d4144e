//! Error types for Lantern server operations.

use thiserror::Error;

/// Main error type for Lantern operations
#[derive(Error, Debug)]
pub enum LanternError {
    /// Configuration is unusable (unreadable file, bad TOML, missing root dir)
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The external `PORT` setting is not an integer
    #[error("invalid PORT value '{0}': expected an integer")]
    InvalidPort(String),

    /// Another process already holds the requested port
    #[error("port {0} is already in use")]
    PortInUse(u16),

    /// Any other failure while binding the listening socket
    #[error("failed to start server: {0}")]
    Startup(String),

    /// The serving loop itself failed
    #[error("server error: {0}")]
    Serve(String),
}

/// Result type alias for Lantern operations
pub type Result<T> = std::result::Result<T, LanternError>;
