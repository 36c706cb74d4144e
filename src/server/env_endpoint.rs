//! The `/env.json` virtual endpoint.
//!
//! Returns the whitelisted environment view as JSON. The env-definition file
//! is read fresh on every request, so there is no cache to invalidate and no
//! state shared between requests.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::config::ServeConfig;
use crate::env_file::{self, SafeEnv};

/// Handler for `GET /env.json`.
pub async fn env_json(State(config): State<Arc<ServeConfig>>) -> Json<SafeEnv> {
    let record = env_file::load(&config.env_file).await;
    tracing::debug!(vars = record.len(), "serving env.json");
    Json(SafeEnv::project(&record))
}
