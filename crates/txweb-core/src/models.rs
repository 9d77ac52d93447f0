//! Core data models for the dashboard

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;

use super::types::{PaymentMethod, TransactionStatus, TransactionType};

/// Transaction record as returned by the upstream API
///
/// Read-only display data; the dashboard never modifies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique transaction identifier
    pub transaction_id: String,
    pub customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    pub transaction_type: TransactionType,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub transaction_status: TransactionStatus,
    pub payment_method: PaymentMethod,
    /// Expected maturity date (date string as sent by the API)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_maturity_date: Option<String>,
    /// Realized return rate; numbers and numeric strings are accepted, anything else is dropped
    #[serde(default, deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub actual_return_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    /// Free-text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Transaction {
    /// Customer name, or the id when no name is set
    pub fn customer_display(&self) -> &str {
        display_or_id(self.customer_name.as_deref(), &self.customer_id)
    }

    /// Product name, or the id when no name is set
    pub fn product_display(&self) -> &str {
        display_or_id(self.product_name.as_deref(), &self.product_id)
    }

    /// Notes, when present and not blank
    pub fn notes_text(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// Decode an optional decimal without failing the whole record on odd input
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => Decimal::from_str(&n.to_string())
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64_retain)),
        Some(Value::String(s)) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    })
}

fn display_or_id<'a>(name: Option<&'a str>, id: &'a str) -> &'a str {
    match name {
        Some(n) if !n.is_empty() => n,
        _ => id,
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Minimal valid record used across tests
    pub fn transaction(id: &str) -> Transaction {
        Transaction {
            transaction_id: id.to_string(),
            customer_id: "C1".to_string(),
            customer_name: None,
            product_id: "P1".to_string(),
            product_name: Some("稳健理财一号".to_string()),
            transaction_type: TransactionType::Purchase,
            quantity: Decimal::new(100, 0),
            unit_price: Decimal::new(105, 2),
            total_amount: Decimal::new(10500, 2),
            transaction_status: TransactionStatus::Completed,
            payment_method: PaymentMethod::BankCard,
            expected_maturity_date: None,
            actual_return_rate: None,
            completed_at: None,
            created_at: "2024-06-15T08:30:00Z".to_string(),
            updated_at: "2024-06-15T08:30:00Z".to_string(),
            notes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_camel_case() {
        let json = r#"{
            "transactionId": "T1",
            "customerId": "C1",
            "customerName": "张三",
            "productId": "P1",
            "transactionType": "redeem",
            "quantity": 10,
            "unitPrice": "1.2500",
            "totalAmount": 12.5,
            "transactionStatus": "completed",
            "paymentMethod": "alipay",
            "actualReturnRate": 0.035,
            "createdAt": "2024-06-15T08:30:00Z",
            "updatedAt": "2024-06-16T08:30:00Z"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.transaction_id, "T1");
        assert_eq!(tx.transaction_type, TransactionType::Redeem);
        assert_eq!(tx.quantity, Decimal::new(10, 0));
        assert_eq!(tx.unit_price, Decimal::new(12500, 4));
        assert_eq!(tx.actual_return_rate, Some(Decimal::new(35, 3)));
        assert_eq!(tx.customer_display(), "张三");
        assert_eq!(tx.product_display(), "P1");
        assert!(tx.notes.is_none());
    }

    #[test]
    fn test_return_rate_as_string() {
        let mut value = serde_json::to_value(fixtures::transaction("T1")).unwrap();
        value["actualReturnRate"] = serde_json::json!("0.0350");
        let tx: Transaction = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(tx.actual_return_rate, Some(Decimal::new(350, 4)));

        value["actualReturnRate"] = serde_json::json!("N/A");
        let tx: Transaction = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(tx.actual_return_rate, None);

        value["actualReturnRate"] = serde_json::Value::Null;
        let tx: Transaction = serde_json::from_value(value).unwrap();
        assert_eq!(tx.actual_return_rate, None);
    }

    #[test]
    fn test_display_falls_back_to_id() {
        let mut tx = fixtures::transaction("T1");
        tx.customer_name = Some(String::new());
        assert_eq!(tx.customer_display(), "C1");
        assert_eq!(tx.product_display(), "稳健理财一号");
    }

    #[test]
    fn test_blank_notes_hidden() {
        let mut tx = fixtures::transaction("T1");
        tx.notes = Some("  ".to_string());
        assert_eq!(tx.notes_text(), None);
        tx.notes = Some("首次申购".to_string());
        assert_eq!(tx.notes_text(), Some("首次申购"));
    }
}
