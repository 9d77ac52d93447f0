//! List page normalization and stale-while-revalidate state

use serde::{Deserialize, Serialize};

use crate::envelope::ListResponse;
use crate::error::CoreError;
use crate::models::Transaction;
use crate::query::QueryParams;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;

/// Page, page size, total records and total pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl PaginationMeta {
    /// Build metadata, deriving `total_pages` when the server did not send it
    pub fn new(page: u32, limit: u32, total: u64, total_pages: Option<u32>) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: total_pages.unwrap_or_else(|| derive_total_pages(total, limit)),
        }
    }

    /// Metadata shown before any page has loaded
    pub fn fallback(committed: &QueryParams) -> Self {
        Self::new(
            committed.page.unwrap_or(DEFAULT_PAGE),
            committed.limit.unwrap_or(DEFAULT_LIMIT),
            0,
            None,
        )
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// `max(1, ceil(total / limit))`; 1 when limit is 0
pub fn derive_total_pages(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 1;
    }
    let pages = total.div_ceil(limit as u64).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// One normalized page of the transaction list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage {
    pub rows: Vec<Transaction>,
    pub meta: PaginationMeta,
}

impl ListPage {
    /// Unwrap the envelope, filling missing fields from the committed parameters
    pub fn normalize(response: ListResponse, committed: &QueryParams) -> Self {
        let data = response.data.unwrap_or_default();
        let page = data.page.or(committed.page).unwrap_or(DEFAULT_PAGE);
        let limit = data.limit.or(committed.limit).unwrap_or(DEFAULT_LIMIT);
        let total = data.total.unwrap_or(0);

        Self {
            rows: data.data,
            meta: PaginationMeta::new(page, limit, total, data.total_pages),
        }
    }
}

/// What happened to a completed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Result replaced (or failed over) the current page
    Current,
    /// A newer request superseded this one; result dropped
    Stale,
}

/// Rows on screen plus the in-flight request, keyed by request URL
///
/// Previous rows stay visible while a new key is pending. Only the most
/// recently started key may apply its result.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    loaded: Option<ListPage>,
    loaded_key: Option<String>,
    pending: Option<String>,
    toast: Option<String>,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as the request in flight
    pub fn begin(&mut self, key: &str) {
        self.pending = Some(key.to_string());
    }

    /// Apply the result for `key` if it is still the pending request
    pub fn complete(&mut self, key: &str, result: Result<ListPage, CoreError>) -> Applied {
        if self.pending.as_deref() != Some(key) {
            log::debug!(target: "txweb::list", "Dropping stale response for {}", key);
            return Applied::Stale;
        }
        self.pending = None;

        match result {
            Ok(page) => {
                self.loaded = Some(page);
                self.loaded_key = Some(key.to_string());
                self.toast = None;
            }
            Err(e) => {
                log::warn!(target: "txweb::list", "List fetch failed for {}: {}", key, e);
                self.toast = Some(e.to_string());
            }
        }
        Applied::Current
    }

    /// Rows of the last successful page (kept while a new one loads)
    pub fn rows(&self) -> &[Transaction] {
        self.loaded.as_ref().map(|p| p.rows.as_slice()).unwrap_or(&[])
    }

    pub fn page(&self) -> Option<&ListPage> {
        self.loaded.as_ref()
    }

    /// Key the visible rows were fetched with
    pub fn loaded_key(&self) -> Option<&str> {
        self.loaded_key.as_deref()
    }

    pub fn pending_key(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Fetch in flight and nothing to show yet
    pub fn is_loading(&self) -> bool {
        self.pending.is_some() && self.loaded.is_none()
    }

    /// Fetch in flight, whether or not older rows are shown
    pub fn is_validating(&self) -> bool {
        self.pending.is_some()
    }

    /// Pagination for the footer: the loaded page's, else derived from `committed`
    pub fn pagination(&self, committed: &QueryParams) -> PaginationMeta {
        self.loaded
            .as_ref()
            .map(|p| p.meta)
            .unwrap_or_else(|| PaginationMeta::fallback(committed))
    }

    /// Error message to show once as a notification
    pub fn take_toast(&mut self) -> Option<String> {
        self.toast.take()
    }
}
