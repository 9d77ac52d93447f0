//! Route modules for the API server
//!
//! - transactions: Transaction list, filter, pagination, detail dialog
//! - settings: Settings page
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints and HTMX partials
//! - page.rs: HTML rendering

pub mod settings;
pub mod transactions;
