//! Transaction models, query state and response normalization
//!
//! - query: committed/draft parameters and the fetch gate
//! - list: page normalization and stale-while-revalidate rows
//! - detail: detail fetch key and dialog state
//! - view: table-local UI state
//! - envelope: upstream response wrapper and error-body decoding

pub mod detail;
pub mod envelope;
pub mod error;
pub mod list;
pub mod models;
pub mod query;
pub mod time;
pub mod types;
pub mod view;

pub use detail::{detail_key, DetailState};
pub use envelope::{ApiResponse, DetailResponse, Endpoint, ListResponse, TransactionListData};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use list::{Applied, ListPage, ListState, PaginationMeta};
pub use models::Transaction;
pub use query::{QueryController, QueryParams};
pub use types::{PaymentMethod, TransactionStatus, TransactionType};
pub use view::TableViewState;

/// State of the transactions page: the single source of truth for rows and pagination
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub query: QueryController,
    pub list: ListState,
    pub view: TableViewState,
}

impl Dashboard {
    pub fn new(page_size: u32) -> Self {
        Self {
            query: QueryController::new(page_size),
            list: ListState::new(),
            view: TableViewState::new(),
        }
    }

    /// Current pagination numbers for the footer
    pub fn pagination(&self) -> PaginationMeta {
        self.list.pagination(self.query.committed())
    }

    /// Start a fetch for the committed query; `None` while fetching is disabled
    pub fn begin_fetch(&mut self) -> Option<String> {
        let key = self.query.request_key()?;
        self.list.begin(&key);
        Some(key)
    }

    /// Apply a list response for `key`
    pub fn complete_fetch(&mut self, key: &str, result: CoreResult<ListResponse>) -> Applied {
        let committed = self.query.committed().clone();
        self.list
            .complete(key, result.map(|resp| ListPage::normalize(resp, &committed)))
    }
}

// ==================== Tests ====================
