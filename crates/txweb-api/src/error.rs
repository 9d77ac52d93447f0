//! Error types for txweb-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use txweb_core::{CoreError, ErrorSeverity};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("{0}")]
    Upstream(#[from] CoreError),

    #[error("Failed to bind {addr}: {message}")]
    Bind { addr: String, message: String },

    #[error("Server error: {message}")]
    Server { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Upstream(CoreError::Upstream { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Upstream(CoreError::TransactionNotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Bind { .. } | ApiError::Server { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON errors use the same `{success, message}` envelope as the upstream API,
/// plus `code` and `suggestions` for upstream failures
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::Upstream(error) => {
                let details = error.to_details();
                match error.severity() {
                    ErrorSeverity::Info => log::info!(target: "txweb::api", "{}", details),
                    ErrorSeverity::Warning => log::warn!(target: "txweb::api", "{}", details),
                    ErrorSeverity::Error => log::error!(target: "txweb::api", "{}", details),
                }
                serde_json::json!({
                    "success": false,
                    "message": details.message,
                    "code": details.code,
                    "suggestions": details.suggestions,
                })
            }
            _ => serde_json::json!({
                "success": false,
                "message": self.to_string(),
            }),
        };
        (self.status(), Json(body)).into_response()
    }
}
