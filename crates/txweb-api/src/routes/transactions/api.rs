//! Transactions API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: Current rows, pagination and query flags (JSON)
//! - api_transaction_detail: Single transaction (JSON)
//! - htmx_transactions_list: List fragment for the committed query
//! - htmx_update_draft: Edit the draft filter (no fetch)
//! - htmx_query: Submit the draft and fetch
//! - htmx_change_page / htmx_change_page_size: Pagination
//! - htmx_refresh: Re-fetch the committed query when enabled
//! - htmx_toggle_column: Column visibility
//! - htmx_transaction_detail / htmx_close_detail: Detail dialog

use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};
use txweb_core::{
    detail_key, Applied, CoreError, DetailState, PaginationMeta, QueryParams, Transaction,
};

use super::page::{render_detail_body, render_list};
use crate::{page_response, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct DraftForm {
    #[serde(rename = "productId", default)]
    pub product_id: String,
}

#[derive(Debug, Deserialize)]
pub struct QueryForm {
    #[serde(rename = "productId")]
    pub product_id: Option<String>,
}

/// Page number as typed into the jump box; blank or non-numeric input is ignored
#[derive(Debug, Deserialize)]
pub struct PageForm {
    #[serde(default)]
    pub page: String,
}

impl PageForm {
    fn page(&self) -> Option<i64> {
        self.page.trim().parse().ok()
    }
}

#[derive(Debug, Deserialize)]
pub struct PageSizeForm {
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    #[serde(rename = "transactionId")]
    pub transaction_id: Option<String>,
}

/// Whether rendering the list should hit the upstream API first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Always re-request the committed key
    Always,
    /// Only when the visible rows belong to another key
    IfStale,
    /// Render what is already loaded
    Never,
}

/// Fetch (per `mode`) and render the list fragment
///
/// The dashboard lock is released while the request is in flight.
pub(crate) async fn list_fragment(state: &AppState, mode: FetchMode) -> String {
    let key = {
        let mut dashboard = state.dashboard.write().await;
        let wanted = match (mode, dashboard.query.request_key()) {
            (FetchMode::Never, _) | (_, None) => false,
            (FetchMode::Always, Some(_)) => true,
            (FetchMode::IfStale, Some(key)) => dashboard.list.loaded_key() != Some(key.as_str()),
        };
        if wanted {
            dashboard.begin_fetch()
        } else {
            None
        }
    };

    if let Some(key) = key {
        let result = state.source.fetch_list(&key).await;
        let mut dashboard = state.dashboard.write().await;
        if dashboard.complete_fetch(&key, result) == Applied::Stale {
            log::debug!(target: "txweb::api", "Superseded list response for {}", key);
        }
    }

    let mut dashboard = state.dashboard.write().await;
    let toast = dashboard.list.take_toast();
    let meta = dashboard.pagination();
    render_list(
        &dashboard.view,
        dashboard.list.rows(),
        dashboard.list.is_loading(),
        dashboard.query.is_enabled(),
        &meta,
        &state.config.pagination.page_size_options,
        toast.as_deref(),
    )
}

/// List fragment for the committed query
pub async fn htmx_transactions_list(
    state: State<AppState>,
    headers: axum::http::HeaderMap,
) -> Html<String> {
    let html = list_fragment(&state, FetchMode::IfStale).await;
    Html(page_response(&headers, "交易记录", "/transactions", &html))
}

/// Edit the draft product filter; nothing is requested
pub async fn htmx_update_draft(state: State<AppState>, Form(form): Form<DraftForm>) -> StatusCode {
    let mut dashboard = state.dashboard.write().await;
    dashboard.view.set_search_query(&form.product_id);
    dashboard.query.update_draft(&form.product_id);
    StatusCode::NO_CONTENT
}

/// Submit the draft (optionally updated by the form) and fetch
pub async fn htmx_query(state: State<AppState>, Form(form): Form<QueryForm>) -> Html<String> {
    {
        let mut dashboard = state.dashboard.write().await;
        if let Some(product_id) = form.product_id.as_deref() {
            dashboard.view.set_search_query(product_id);
            dashboard.query.update_draft(product_id);
        }
        dashboard.query.submit();
        log::info!(
            target: "txweb::api",
            "Query submitted: {}",
            dashboard.query.committed().to_query_string()
        );
    }
    Html(list_fragment(&state, FetchMode::Always).await)
}

pub async fn htmx_change_page(state: State<AppState>, Form(form): Form<PageForm>) -> Html<String> {
    match form.page() {
        Some(page) => {
            state.dashboard.write().await.query.change_page(page);
        }
        None => {
            log::debug!(target: "txweb::api", "Ignoring page jump to {:?}", form.page);
        }
    }
    Html(list_fragment(&state, FetchMode::IfStale).await)
}

pub async fn htmx_change_page_size(
    state: State<AppState>,
    Form(form): Form<PageSizeForm>,
) -> Html<String> {
    state.dashboard.write().await.query.change_page_size(form.limit);
    Html(list_fragment(&state, FetchMode::IfStale).await)
}

/// Re-fetch the committed query; a no-op render while fetching is disabled
pub async fn htmx_refresh(state: State<AppState>) -> Html<String> {
    let mode = match state.dashboard.read().await.query.refresh() {
        Some(_) => FetchMode::Always,
        None => FetchMode::Never,
    };
    Html(list_fragment(&state, mode).await)
}

pub async fn htmx_toggle_column(state: State<AppState>, Path(key): Path<String>) -> Html<String> {
    let hidden = state.dashboard.write().await.view.toggle_column(&key);
    log::debug!(target: "txweb::api", "Column {} hidden: {}", key, hidden);
    Html(list_fragment(&state, FetchMode::Never).await)
}

/// Open the detail dialog and render its body
///
/// Without a usable id the dialog shows "未选择交易" and nothing is requested.
pub async fn htmx_transaction_detail(
    state: State<AppState>,
    Query(query): Query<DetailQuery>,
) -> Html<String> {
    let key = {
        let mut dashboard = state.dashboard.write().await;
        dashboard.view.open_detail(query.transaction_id.as_deref());
        dashboard.view.detail_key()
    };

    let detail = match key {
        None => DetailState::NotSelected,
        Some(key) => DetailState::from_result(state.source.fetch_detail(&key).await),
    };
    Html(render_detail_body(&detail))
}

pub async fn htmx_close_detail(state: State<AppState>) -> StatusCode {
    state.dashboard.write().await.view.close_detail();
    StatusCode::NO_CONTENT
}

/// Snapshot of the dashboard served by `api_transactions`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsSnapshot {
    pub data: Vec<Transaction>,
    pub pagination: PaginationMeta,
    pub enabled: bool,
    pub is_loading: bool,
    pub is_validating: bool,
    pub committed: QueryParams,
    pub draft: QueryParams,
}

/// Current rows and pagination (JSON API)
pub async fn api_transactions(state: State<AppState>) -> Json<TransactionsSnapshot> {
    let dashboard = state.dashboard.read().await;
    Json(TransactionsSnapshot {
        data: dashboard.list.rows().to_vec(),
        pagination: dashboard.pagination(),
        enabled: dashboard.query.is_enabled(),
        is_loading: dashboard.list.is_loading(),
        is_validating: dashboard.list.is_validating(),
        committed: dashboard.query.committed().clone(),
        draft: dashboard.query.draft().clone(),
    })
}

/// Single transaction detail (JSON API)
pub async fn api_transaction_detail(
    state: State<AppState>,
    Query(query): Query<DetailQuery>,
) -> Result<Json<Transaction>, ApiError> {
    let id = query.transaction_id.unwrap_or_default();
    let key = detail_key(Some(&id)).ok_or_else(|| ApiError::BadRequest {
        message: "transactionId is required".to_string(),
    })?;

    let response = state.source.fetch_detail(&key).await?;
    response
        .data
        .map(Json)
        .ok_or_else(|| CoreError::TransactionNotFound { id: id.trim().to_string() }.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_router;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;
    use txweb_client::TransactionSource;
    use txweb_config::Config;
    use txweb_core::{ApiResponse, CoreResult, DetailResponse, ListResponse, TransactionListData};

    /// In-memory upstream that records every requested key
    #[derive(Default)]
    struct FakeSource {
        requests: Mutex<Vec<String>>,
        list_error: Option<CoreError>,
    }

    impl FakeSource {
        fn failing(error: CoreError) -> Self {
            Self { list_error: Some(error), ..Self::default() }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    fn record(id: &str) -> Transaction {
        serde_json::from_value(serde_json::json!({
            "transactionId": id,
            "customerId": "C1",
            "productId": "P1",
            "productName": "稳健理财一号",
            "transactionType": "purchase",
            "quantity": 100,
            "unitPrice": "1.05",
            "totalAmount": "105",
            "transactionStatus": "completed",
            "paymentMethod": "alipay",
            "createdAt": "2024-06-15T08:30:00Z",
            "updatedAt": "2024-06-15T08:30:00Z"
        }))
        .unwrap()
    }

    #[async_trait]
    impl TransactionSource for FakeSource {
        async fn fetch_list(&self, key: &str) -> CoreResult<ListResponse> {
            self.requests.lock().unwrap().push(key.to_string());
            if let Some(error) = &self.list_error {
                return Err(error.clone());
            }
            let page = if key.contains("page=2") { "row-page-2" } else { "row-page-1" };
            Ok(ApiResponse {
                success: true,
                data: Some(TransactionListData {
                    data: vec![record(page)],
                    total: Some(25),
                    page: None,
                    limit: None,
                    total_pages: None,
                }),
                timestamp: None,
                message: None,
            })
        }

        async fn fetch_detail(&self, key: &str) -> CoreResult<DetailResponse> {
            self.requests.lock().unwrap().push(key.to_string());
            if key.ends_with("missing") {
                return Err(CoreError::Upstream { status: 404, message: "X".to_string() });
            }
            let id = key.rsplit('=').next().unwrap_or_default();
            Ok(ApiResponse { success: true, data: Some(record(id)), timestamp: None, message: None })
        }
    }

    fn app(source: FakeSource) -> (AppState, Arc<FakeSource>) {
        let source = Arc::new(source);
        (AppState::new(Config::default(), source.clone()), source)
    }

    async fn send(state: &AppState, method: &str, uri: &str, form: Option<&str>) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(uri).header("hx-request", "true");
        if form.is_some() {
            builder = builder.header("content-type", "application/x-www-form-urlencoded");
        }
        let request = builder.body(Body::from(form.unwrap_or("").to_string())).unwrap();

        let response = create_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_list_disabled_until_query() {
        let (state, source) = app(FakeSource::default());
        let (status, body) = send(&state, "GET", "/transactions/list", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("请输入查询条件后点击“查询”"));
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn test_draft_edit_does_not_fetch() {
        let (state, source) = app(FakeSource::default());
        let (status, _) = send(&state, "POST", "/transactions/draft", Some("productId=P1")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(source.requests().is_empty());

        let dashboard = state.dashboard.read().await;
        assert_eq!(dashboard.query.draft().product_id.as_deref(), Some("P1"));
        assert_eq!(dashboard.query.committed().product_id, None);
    }

    #[tokio::test]
    async fn test_query_fetches_committed_params() {
        let (state, source) = app(FakeSource::default());
        let (_, body) = send(&state, "POST", "/transactions/query", Some("productId=P1")).await;
        assert_eq!(
            source.requests(),
            vec!["/api/v1/customers/purchases?page=1&limit=10&productId=P1".to_string()]
        );
        assert!(body.contains("row-page-1"));
        assert!(body.contains("共 25 条记录，第 1 / 3 页"));
    }

    #[tokio::test]
    async fn test_page_change_and_clamp() {
        let (state, source) = app(FakeSource::default());
        send(&state, "POST", "/transactions/query", Some("")).await;

        let (_, body) = send(&state, "POST", "/transactions/page", Some("page=2")).await;
        assert!(body.contains("row-page-2"));
        assert!(body.contains("第 2 / 3 页"));

        send(&state, "POST", "/transactions/page", Some("page=-4")).await;
        assert_eq!(state.dashboard.read().await.query.committed().page, Some(1));
        assert_eq!(source.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_blank_page_jump_keeps_current_page() {
        let (state, source) = app(FakeSource::default());
        send(&state, "POST", "/transactions/query", Some("")).await;
        send(&state, "POST", "/transactions/page", Some("page=2")).await;

        let (status, body) = send(&state, "POST", "/transactions/page", Some("page=")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("第 2 / 3 页"));
        assert_eq!(state.dashboard.read().await.query.committed().page, Some(2));
        assert_eq!(source.requests().len(), 2);

        let (status, _) = send(&state, "POST", "/transactions/page", Some("page=abc")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_page_size_resets_page() {
        let (state, source) = app(FakeSource::default());
        send(&state, "POST", "/transactions/query", Some("")).await;
        send(&state, "POST", "/transactions/page", Some("page=2")).await;
        send(&state, "POST", "/transactions/page-size", Some("limit=20")).await;

        let last = source.requests().pop().unwrap();
        assert_eq!(last, "/api/v1/customers/purchases?page=1&limit=20");
    }

    #[tokio::test]
    async fn test_refresh_only_when_enabled() {
        let (state, source) = app(FakeSource::default());
        send(&state, "POST", "/transactions/refresh", None).await;
        assert!(source.requests().is_empty());

        send(&state, "POST", "/transactions/query", Some("")).await;
        send(&state, "POST", "/transactions/refresh", None).await;
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_list_error_shows_toast_once() {
        let error = CoreError::Upstream { status: 400, message: "X".to_string() };
        let (state, _) = app(FakeSource::failing(error));
        let (_, body) = send(&state, "POST", "/transactions/query", Some("")).await;
        assert!(body.contains("<span class='tx-toast-message'>X</span>"));

        let (_, body) = send(&state, "POST", "/transactions/columns/quantity/toggle", None).await;
        assert!(!body.contains("tx-toast"));
    }

    #[tokio::test]
    async fn test_toggle_column_hides_without_fetch() {
        let (state, source) = app(FakeSource::default());
        send(&state, "POST", "/transactions/query", Some("")).await;
        let (_, body) = send(&state, "POST", "/transactions/columns/paymentMethod/toggle", None).await;
        assert!(!body.contains("data-column='paymentMethod'"));
        assert!(body.contains("data-column='actions'"));
        assert_eq!(source.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_detail_without_id_makes_no_request() {
        let (state, source) = app(FakeSource::default());
        let (_, body) = send(&state, "GET", "/transactions/detail", None).await;
        assert!(body.contains("未选择交易"));
        assert!(source.requests().is_empty());
        assert!(state.dashboard.read().await.view.is_detail_open());
    }

    #[tokio::test]
    async fn test_detail_loaded_and_failed() {
        let (state, _) = app(FakeSource::default());
        let (_, body) = send(&state, "GET", "/transactions/detail?transactionId=T9", None).await;
        assert!(body.contains("T9"));
        assert!(body.contains("稳健理财一号"));

        let (_, body) = send(&state, "GET", "/transactions/detail?transactionId=missing", None).await;
        assert!(body.contains("加载失败：<span class='tx-error-message'>X</span>"));
    }

    #[tokio::test]
    async fn test_close_detail_clears_selection() {
        let (state, _) = app(FakeSource::default());
        send(&state, "GET", "/transactions/detail?transactionId=T1", None).await;
        let (status, _) = send(&state, "POST", "/transactions/detail/close", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let dashboard = state.dashboard.read().await;
        assert!(!dashboard.view.is_detail_open());
        assert_eq!(dashboard.view.selected(), None);
    }

    #[tokio::test]
    async fn test_api_detail_requires_id() {
        let (state, source) = app(FakeSource::default());
        let (status, body) = send(&state, "GET", "/api/transactions/detail?transactionId=%20", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("\"success\":false"));
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn test_api_detail_passes_upstream_status() {
        let (state, _) = app(FakeSource::default());
        let (status, body) = send(&state, "GET", "/api/transactions/detail?transactionId=missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("\"message\":\"X\""));
    }

    #[tokio::test]
    async fn test_api_snapshot() {
        let (state, _) = app(FakeSource::default());
        send(&state, "POST", "/transactions/query", Some("productId=P1")).await;

        let (status, body) = send(&state, "GET", "/api/transactions", None).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["enabled"], true);
        assert_eq!(json["pagination"]["totalPages"], 3);
        assert_eq!(json["committed"]["productId"], "P1");
        assert_eq!(json["data"][0]["transactionId"], "row-page-1");
    }
}
