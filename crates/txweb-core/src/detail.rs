//! Detail dialog fetch key and render state

use crate::envelope::{DetailResponse, DETAIL_PATH};
use crate::error::CoreError;
use crate::models::Transaction;

/// Relative URL of the detail request; `None` when nothing usable is selected
pub fn detail_key(transaction_id: Option<&str>) -> Option<String> {
    let id = transaction_id.map(str::trim).filter(|id| !id.is_empty())?;
    Some(format!("{}?transactionId={}", DETAIL_PATH, urlencoding::encode(id)))
}

/// Everything the detail dialog can show, derived only from the fetch
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    NotSelected,
    Loading,
    Failed(String),
    Loaded(Box<Transaction>),
    /// Successful response without a record
    Empty,
}

impl DetailState {
    pub fn from_result(result: Result<DetailResponse, CoreError>) -> Self {
        match result {
            Ok(response) => match response.data {
                Some(tx) => DetailState::Loaded(Box::new(tx)),
                None => DetailState::Empty,
            },
            Err(e) => DetailState::Failed(e.to_string()),
        }
    }

    pub fn transaction(&self) -> Option<&Transaction> {
        match self {
            DetailState::Loaded(tx) => Some(tx),
            _ => None,
        }
    }
}
