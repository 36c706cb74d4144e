//! Serving loop for the Lantern development server.
//!
//! One explicit router: the `/env.json` virtual route, with everything else
//! falling through to static file serving rooted at the configured directory.
//! The loop runs until the cancellation token fires, then shuts down cleanly.

pub mod env_endpoint;

use std::io::ErrorKind;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::config::ServeConfig;
use crate::error::LanternError;

/// Build the request router.
///
/// `GET /env.json` serves the filtered env view with a permissive CORS layer
/// so the frontend can fetch it from any origin. Every other path resolves
/// against the serving root with standard file-server semantics: directory
/// index, inferred content type, 404 on miss. `ServeDir` rejects `..` path
/// components, so requests cannot escape the root.
pub fn build_router(config: Arc<ServeConfig>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    Router::new()
        .route("/env.json", get(env_endpoint::env_json).layer(cors))
        .fallback_service(ServeDir::new(&config.root))
        .with_state(config)
}

/// Bind the configured address and serve until cancelled.
///
/// `AddrInUse` is mapped to [`LanternError::PortInUse`] so the CLI can print
/// actionable guidance; any other bind failure surfaces its message verbatim
/// as [`LanternError::Startup`].
pub async fn run(config: Arc<ServeConfig>, cancel: CancellationToken) -> crate::Result<()> {
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| match e.kind() {
            ErrorKind::AddrInUse => LanternError::PortInUse(config.port),
            _ => LanternError::Startup(e.to_string()),
        })?;

    let local_addr = listener
        .local_addr()
        .map_err(|e| LanternError::Startup(e.to_string()))?;
    tracing::info!(
        addr = %local_addr,
        root = %config.root.display(),
        env_file = %config.env_file.display(),
        "lantern serving"
    );

    let app = build_router(config);
    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await
        .map_err(|e| LanternError::Serve(e.to_string()))?;

    tracing::info!("lantern server stopped");
    Ok(())
}
