//! Lantern — environment-aware local development server.
//!
//! Serves static site assets from a root directory and exposes `GET /env.json`,
//! a whitelisted JSON view of the project's `.env` file for the frontend.
//! Configuration merges CLI flags, the `PORT` env var, and an optional
//! `lantern.toml`; port conflicts fail fast with actionable guidance.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use lantern::{load_file_config, FileConfig, LanternError, Overrides, ServeConfig};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Lantern — environment-aware local development server.
#[derive(Parser)]
#[command(
    name = "lantern",
    version,
    about = "Lantern — serve a static site with a live /env.json config endpoint"
)]
struct Cli {
    /// Path to lantern.toml [default: ./lantern.toml or ~/.config/lantern/lantern.toml]
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Port to listen on [default: $PORT, then 3000]
    #[arg(short, long)]
    port: Option<u16>,
    /// Bind address
    #[arg(long)]
    host: Option<String>,
    /// Directory to serve static assets from [default: current directory]
    #[arg(short, long)]
    root: Option<PathBuf>,
    /// Env-definition file exposed through /env.json [default: <root>/.env]
    #[arg(long)]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with env filter (RUST_LOG controls verbosity)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    print_banner();

    let cli = Cli::parse();
    let cancel = CancellationToken::new();

    // Ctrl-C handler — cancels the root token for graceful shutdown
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Shutting down lantern...");
        cancel_for_signal.cancel();
    });

    let file_config = match resolve_config(cli.config) {
        Some(path) => load_file_config(&path).await?,
        None => FileConfig::default(),
    };
    let overrides = Overrides {
        host: cli.host,
        port: cli.port,
        root: cli.root,
        env_file: cli.env_file,
    };
    let config = ServeConfig::resolve(file_config, overrides)?;
    config.validate()?;

    tracing::info!(
        port = config.port,
        root = %config.root.display(),
        "starting lantern development server"
    );
    tracing::info!("Press Ctrl+C to stop");

    match lantern::server::run(Arc::new(config), cancel).await {
        Ok(()) => {
            tracing::info!("Server stopped gracefully");
            Ok(())
        }
        Err(LanternError::PortInUse(port)) => Err(anyhow::anyhow!(
            "port {port} is already in use.\n  \
             Try a different port: lantern --port <PORT>\n  \
             Or stop the process currently bound to port {port}"
        )),
        Err(e) => Err(e.into()),
    }
}

/// Resolve config file path: explicit flag → ./lantern.toml → ~/.config/lantern/lantern.toml.
///
/// Unlike the config file itself, absence is fine: `None` means defaults apply.
fn resolve_config(explicit: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path);
    }

    let local = Path::new("lantern.toml");
    if local.exists() {
        return Some(local.to_path_buf());
    }

    if let Some(config_dir) = dirs::config_dir() {
        let xdg = config_dir.join("lantern").join("lantern.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }

    None
}

/// Print a one-line startup banner to stderr.
///
/// Respects NO_COLOR and skips output when stderr is not a terminal.
fn print_banner() {
    use std::io::IsTerminal;

    if !std::io::stderr().is_terminal() || std::env::var_os("NO_COLOR").is_some() {
        return;
    }

    eprintln!(
        "\x1b[1;38;2;235;150;75mlantern\x1b[0m v{} — local development server\n",
        env!("CARGO_PKG_VERSION")
    );
}
