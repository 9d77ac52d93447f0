//! Query controller: committed vs. draft parameters
//!
//! Draft parameters are what the filter form currently holds; committed
//! parameters drive the request. Nothing is fetched until the first
//! explicit action (submit or a pagination control) enables fetching.

use serde::{Deserialize, Serialize};

use crate::envelope::LIST_PATH;

/// Page, page size and product filter for the list request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    /// 1-based page number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

impl QueryParams {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            product_id: None,
        }
    }

    /// Query string of the defined, non-empty parameters, in `page`, `limit`, `productId` order
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(product_id) = self.product_id.as_deref().filter(|p| !p.is_empty()) {
            pairs.push(("productId", product_id.to_string()));
        }

        pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Owns committed and draft parameters plus the fetch gate
#[derive(Debug, Clone)]
pub struct QueryController {
    committed: QueryParams,
    draft: QueryParams,
    enabled: bool,
}

impl QueryController {
    /// Both copies start at page 1 with the given page size; fetching is disabled
    pub fn new(page_size: u32) -> Self {
        let initial = QueryParams::new(1, page_size.max(1));
        Self {
            committed: initial.clone(),
            draft: initial,
            enabled: false,
        }
    }

    pub fn committed(&self) -> &QueryParams {
        &self.committed
    }

    pub fn draft(&self) -> &QueryParams {
        &self.draft
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Edit the draft filter. Never triggers a request.
    pub fn update_draft(&mut self, product_id: &str) {
        self.draft.product_id = Some(product_id.to_string());
        self.draft.page = Some(1);
    }

    /// Commit the draft and enable fetching
    pub fn submit(&mut self) {
        self.committed = self.draft.clone();
        self.enabled = true;
    }

    /// Move to another page; values below 1 clamp to 1
    pub fn change_page(&mut self, page: i64) {
        let page = page.clamp(1, u32::MAX as i64) as u32;
        self.committed.page = Some(page);
        self.enabled = true;
    }

    /// Change the page size and go back to the first page
    pub fn change_page_size(&mut self, limit: u32) {
        let limit = limit.max(1);
        self.committed.limit = Some(limit);
        self.committed.page = Some(1);
        // Keep the next submit from reverting the size the user just picked
        self.draft.limit = Some(limit);
        self.enabled = true;
    }

    /// Key to re-issue for a refresh; `None` (no request) until fetching is enabled
    pub fn refresh(&self) -> Option<String> {
        self.request_key()
    }

    /// Relative URL of the list request, or `None` while fetching is disabled
    pub fn request_key(&self) -> Option<String> {
        if !self.enabled {
            return None;
        }
        let query = self.committed.to_query_string();
        if query.is_empty() {
            Some(LIST_PATH.to_string())
        } else {
            Some(format!("{}?{}", LIST_PATH, query))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initially_disabled() {
        let controller = QueryController::new(10);
        assert!(!controller.is_enabled());
        assert_eq!(controller.request_key(), None);
        assert_eq!(controller.refresh(), None);
        assert_eq!(controller.committed(), &QueryParams::new(1, 10));
    }

    #[test]
    fn test_draft_edit_has_no_side_effect() {
        let mut controller = QueryController::new(10);
        controller.update_draft("P1");
        assert!(!controller.is_enabled());
        assert_eq!(controller.committed().product_id, None);
        assert_eq!(controller.draft().product_id.as_deref(), Some("P1"));
    }

    #[test]
    fn test_submit_resets_page_and_enables() {
        let mut controller = QueryController::new(10);
        controller.change_page(4);
        assert_eq!(controller.committed().page, Some(4));

        controller.update_draft("P1");
        controller.submit();

        assert!(controller.is_enabled());
        assert_eq!(controller.committed().page, Some(1));
        assert_eq!(controller.committed().product_id.as_deref(), Some("P1"));
        assert_eq!(
            controller.request_key().as_deref(),
            Some("/api/v1/customers/purchases?page=1&limit=10&productId=P1")
        );
    }

    #[test]
    fn test_submit_without_draft_edit() {
        let mut controller = QueryController::new(10);
        controller.submit();
        assert!(controller.is_enabled());
        assert_eq!(controller.request_key().as_deref(), Some("/api/v1/customers/purchases?page=1&limit=10"));
    }

    #[test]
    fn test_change_page_clamps() {
        let mut controller = QueryController::new(10);
        controller.change_page(0);
        assert_eq!(controller.committed().page, Some(1));
        assert!(controller.is_enabled());

        controller.change_page(-3);
        assert_eq!(controller.committed().page, Some(1));

        controller.change_page(3);
        assert_eq!(controller.committed().page, Some(3));
    }

    #[test]
    fn test_change_page_size_resets_page() {
        let mut controller = QueryController::new(10);
        controller.change_page(5);
        controller.change_page_size(20);
        assert_eq!(controller.committed().page, Some(1));
        assert_eq!(controller.committed().limit, Some(20));
        assert!(controller.is_enabled());

        // A later submit keeps the chosen size
        controller.update_draft("P2");
        controller.submit();
        assert_eq!(controller.committed().limit, Some(20));
    }

    #[test]
    fn test_change_page_size_zero_clamps() {
        let mut controller = QueryController::new(10);
        controller.change_page_size(0);
        assert_eq!(controller.committed().limit, Some(1));
    }

    #[test]
    fn test_draft_not_applied_until_submit() {
        let mut controller = QueryController::new(10);
        controller.change_page(2);
        controller.update_draft("P9");
        assert_eq!(
            controller.request_key().as_deref(),
            Some("/api/v1/customers/purchases?page=2&limit=10")
        );
    }

    #[test]
    fn test_query_string_skips_empty() {
        let params = QueryParams {
            page: Some(1),
            limit: None,
            product_id: Some(String::new()),
        };
        assert_eq!(params.to_query_string(), "page=1");
        assert_eq!(QueryParams::default().to_query_string(), "");
    }

    #[test]
    fn test_query_string_encodes_values() {
        let params = QueryParams {
            page: Some(1),
            limit: Some(10),
            product_id: Some("P 1&2".to_string()),
        };
        assert_eq!(params.to_query_string(), "page=1&limit=10&productId=P%201%262");
    }

    #[test]
    fn test_refresh_reissues_current_key() {
        let mut controller = QueryController::new(10);
        controller.change_page(2);
        assert_eq!(controller.refresh(), controller.request_key());
    }
}
