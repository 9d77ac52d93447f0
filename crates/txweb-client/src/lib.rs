//! Data source for the dashboard
//!
//! The dashboard only ever asks for a request key (a relative URL built by
//! the query controller or the detail view) and receives the decoded
//! envelope. `HttpTransactionSource` talks to the real API.

use async_trait::async_trait;
use std::sync::Arc;
use txweb_core::{CoreResult, DetailResponse, ListResponse};

pub mod error;
pub mod http;

pub use error::ClientError;
pub use http::HttpTransactionSource;

/// Shared source reference
pub type SourceRef = Arc<dyn TransactionSource>;

/// Where transaction pages and records come from
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch one list page; `key` is the list request URL relative to the API root
    async fn fetch_list(&self, key: &str) -> CoreResult<ListResponse>;

    /// Fetch one record; `key` is the detail request URL relative to the API root
    async fn fetch_detail(&self, key: &str) -> CoreResult<DetailResponse>;
}
