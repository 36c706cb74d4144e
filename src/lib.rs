//! Lantern — environment-aware local development server.
//! Serves static site assets from a root directory and exposes `GET /env.json`,
//! a whitelisted JSON projection of the project's `.env` file, so the frontend
//! can pick up configuration without a build step.

pub mod config;
pub mod env_file;
pub mod error;
pub mod server;

pub use config::{
    load_file_config, FileConfig, Overrides, ServeConfig, DEFAULT_HOST, DEFAULT_PORT,
};
pub use env_file::{parse_env_file, SafeEnv};
pub use error::{LanternError, Result};
pub use server::{build_router, run};
