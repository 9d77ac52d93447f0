//! Transaction routes - Transaction list, filter, pagination, detail
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page and fragment rendering
//! - columns.rs: Table column definitions

pub mod api;
pub mod columns;
pub mod page;

pub use api::{
    api_transactions,
    api_transaction_detail,
    htmx_transactions_list,
    htmx_update_draft,
    htmx_query,
    htmx_change_page,
    htmx_change_page_size,
    htmx_refresh,
    htmx_toggle_column,
    htmx_transaction_detail,
    htmx_close_detail,
};

pub use page::page_transactions;
