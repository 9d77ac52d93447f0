//! HTTP dashboard server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::transactions: Transaction list, filter, pagination, detail dialog
//! - routes::settings: Effective configuration display

pub mod error;
pub mod routes;

use axum::{
    response::Redirect,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use txweb_client::SourceRef;
use txweb_config::Config;
use txweb_core::Dashboard;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<RwLock<Dashboard>>,
    pub source: SourceRef,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, source: SourceRef) -> Self {
        let dashboard = Dashboard::new(config.pagination.page_size);
        Self {
            dashboard: Arc::new(RwLock::new(dashboard)),
            source,
            config,
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::settings::{api_settings, page_settings};
    use routes::transactions::{
        api_transaction_detail, api_transactions, htmx_change_page, htmx_change_page_size,
        htmx_close_detail, htmx_query, htmx_refresh, htmx_toggle_column, htmx_transaction_detail,
        htmx_transactions_list, htmx_update_draft, page_transactions,
    };

    let json_api = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions))
        .route("/api/transactions/detail", get(api_transaction_detail))
        .route("/api/settings", get(api_settings))
        .layer(CorsLayer::permissive());

    Router::new()
        .merge(json_api)
        // HTMX page routes
        .route("/", get(|| async { Redirect::to("/transactions") }))
        .route("/transactions", get(page_transactions))
        .route("/settings", get(page_settings))
        // HTMX partial routes
        .route("/transactions/list", get(htmx_transactions_list))
        .route("/transactions/draft", post(htmx_update_draft))
        .route("/transactions/query", post(htmx_query))
        .route("/transactions/page", post(htmx_change_page))
        .route("/transactions/page-size", post(htmx_change_page_size))
        .route("/transactions/refresh", post(htmx_refresh))
        .route("/transactions/columns/:key/toggle", post(htmx_toggle_column))
        .route("/transactions/detail", get(htmx_transaction_detail))
        .route("/transactions/detail/close", post(htmx_close_detail))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - txweb</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        txweb_utils::escape_html(title),
        content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str) -> String {
    let links = [
        ("/transactions", "交易记录", "📋"),
        ("/settings", "设置", "⚙️"),
    ];

    let mut nav = String::from("<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-indigo-600'>txweb</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>");

    for (path, label, icon) in &links {
        let active_class = if current_path.starts_with(path) {
            "bg-indigo-50 text-indigo-600"
        } else {
            "text-gray-600 hover:bg-gray-50"
        };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'>{}<span>{}</span></a></li>"#,
            path, active_class, icon, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

/// Check if request is from HTMX (partial page update)
pub fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page, or return it bare for HTMX partial updates
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        inner_content.to_string()
    } else {
        base_html(title, &format!(r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
            nav_sidebar(current_path), inner_content))
    }
}

/// Start the HTTP server
///
/// Binds to `server.host:server.port` and serves until the process stops.
pub async fn start_server(config: Config, source: SourceRef) -> Result<(), ApiError> {
    let addr = config.bind_addr();
    let state = AppState::new(config, source);
    let router = create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| ApiError::Bind { addr: addr.clone(), message: e.to_string() })?;

    log::info!("Starting txweb server on http://{}", addr);
    log::info!("  - /transactions (Transaction list)");
    log::info!("  - /settings (Configuration)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router)
        .await
        .map_err(|e| ApiError::Server { message: e.to_string() })?;

    log::info!("Server stopped gracefully");
    Ok(())
}
