//! Upstream response envelope and error-body decoding

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::models::Transaction;

/// Path of the paginated purchases list
pub const LIST_PATH: &str = "/api/v1/customers/purchases";
/// Path of the single-transaction lookup
pub const DETAIL_PATH: &str = "/api/v1/customers/transactions/detail";

/// `{success, data, timestamp?, message?}` wrapper used by every response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
}

/// List payload inside the envelope
///
/// Every field is optional on decode; `ListPage::normalize` fills the gaps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListData {
    #[serde(default)]
    pub data: Vec<Transaction>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

pub type ListResponse = ApiResponse<TransactionListData>;
pub type DetailResponse = ApiResponse<Transaction>;

/// Which upstream call failed; selects the generic fallback message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    List,
    Detail,
}

impl Endpoint {
    fn failure_prefix(&self) -> &'static str {
        match self {
            Endpoint::List => "获取交易数据失败",
            Endpoint::Detail => "加载失败",
        }
    }

    /// Message used when the error body carries nothing readable
    pub fn fallback_message(&self, status: u16, reason: &str) -> String {
        format!("{}: {} {}", self.failure_prefix(), status, reason)
    }
}

/// Pull a readable message out of an error body
///
/// Accepts `{message: {message: "..."}}` and `{message: "..."}`.
pub fn error_message(body: &Value) -> Option<String> {
    match body.get("message")? {
        Value::String(s) => Some(s.clone()),
        Value::Object(inner) => match inner.get("message") {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        },
        _ => None,
    }
    .filter(|m| !m.is_empty())
}

/// Convert a non-2xx response into an error carrying a best-effort message
pub fn upstream_error(endpoint: Endpoint, status: u16, reason: &str, body: &[u8]) -> CoreError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .as_ref()
        .and_then(error_message)
        .unwrap_or_else(|| endpoint.fallback_message(status, reason));

    CoreError::Upstream { status, message }
}

/// Decode a successful body into the envelope type
pub fn decode<T>(body: &[u8]) -> Result<ApiResponse<T>, CoreError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_slice(body).map_err(|e| CoreError::InvalidFormat {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_message() {
        let body = br#"{"message":{"message":"X"}}"#;
        let err = upstream_error(Endpoint::List, 400, "Bad Request", body);
        assert_eq!(err.to_string(), "X");
        assert_eq!(err, CoreError::Upstream { status: 400, message: "X".to_string() });
    }

    #[test]
    fn test_flat_message() {
        let err = upstream_error(Endpoint::Detail, 404, "Not Found", r#"{"message":"交易不存在"}"#.as_bytes());
        assert_eq!(err.to_string(), "交易不存在");
    }

    #[test]
    fn test_fallback_per_endpoint() {
        let err = upstream_error(Endpoint::List, 500, "Internal Server Error", b"<html>oops</html>");
        assert_eq!(err.to_string(), "获取交易数据失败: 500 Internal Server Error");

        let err = upstream_error(Endpoint::Detail, 502, "Bad Gateway", b"");
        assert_eq!(err.to_string(), "加载失败: 502 Bad Gateway");
    }

    #[test]
    fn test_non_string_message_ignored() {
        assert_eq!(error_message(&json!({"message": {"code": 7}})), None);
        assert_eq!(error_message(&json!({"message": 42})), None);
        assert_eq!(error_message(&json!({"message": ""})), None);
        assert_eq!(error_message(&json!({"error": "x"})), None);
    }

    #[test]
    fn test_decode_list_with_missing_fields() {
        let body = br#"{"success":true,"data":{"total":25,"limit":10}}"#;
        let resp: ListResponse = decode(body).unwrap();
        let data = resp.data.unwrap();
        assert!(data.data.is_empty());
        assert_eq!(data.total, Some(25));
        assert_eq!(data.total_pages, None);
    }

    #[test]
    fn test_decode_list_with_string_return_rate() {
        let body = r#"{"success":true,"data":{"data":[{
            "transactionId": "T1", "customerId": "C1", "productId": "P1",
            "transactionType": "purchase", "quantity": 1, "unitPrice": 1, "totalAmount": 1,
            "transactionStatus": "completed", "paymentMethod": "alipay",
            "actualReturnRate": "0.0350",
            "createdAt": "2024-06-15T08:30:00Z", "updatedAt": "2024-06-15T08:30:00Z"
        }],"total":1}}"#;
        let resp: ListResponse = decode(body.as_bytes()).unwrap();
        let rows = resp.data.unwrap().data;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].actual_return_rate.map(|r| r.to_string()).as_deref(), Some("0.0350"));
    }

    #[test]
    fn test_decode_detail_without_data() {
        let resp: DetailResponse = decode(br#"{"success":true}"#).unwrap();
        assert!(resp.data.is_none());
    }

    #[test]
    fn test_decode_invalid_json() {
        let err = decode::<Transaction>(b"not json").unwrap_err();
        assert!(matches!(err, CoreError::InvalidFormat { .. }));
    }
}
