//! Settings API endpoints - JSON API

use axum::Json;
use txweb_config::Config;

use crate::AppState;

/// Effective configuration with the API token masked
pub async fn api_settings(state: axum::extract::State<AppState>) -> Json<Config> {
    Json(state.config.masked())
}
