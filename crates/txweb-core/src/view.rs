//! Table-local UI state: filter text, detail dialog, column visibility

use std::collections::BTreeSet;

use crate::detail::detail_key;

#[derive(Debug, Clone, Default)]
pub struct TableViewState {
    search_query: String,
    detail_open: bool,
    selected: Option<String>,
    hidden_columns: BTreeSet<String>,
}

impl TableViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently in the filter input
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.to_string();
    }

    /// Open the dialog for a row; an empty id opens it with nothing selected
    pub fn open_detail(&mut self, transaction_id: Option<&str>) {
        self.selected = transaction_id
            .filter(|id| !id.trim().is_empty())
            .map(str::to_string);
        self.detail_open = true;
    }

    pub fn close_detail(&mut self) {
        self.detail_open = false;
        self.selected = None;
    }

    pub fn is_detail_open(&self) -> bool {
        self.detail_open
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Detail request key: only while the dialog is open with a selection
    pub fn detail_key(&self) -> Option<String> {
        if !self.detail_open {
            return None;
        }
        detail_key(self.selected())
    }

    /// Flip a column between shown and hidden; returns true when now hidden
    pub fn toggle_column(&mut self, key: &str) -> bool {
        if self.hidden_columns.remove(key) {
            false
        } else {
            self.hidden_columns.insert(key.to_string());
            true
        }
    }

    pub fn is_hidden(&self, key: &str) -> bool {
        self.hidden_columns.contains(key)
    }
}
