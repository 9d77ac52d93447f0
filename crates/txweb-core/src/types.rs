//! Enumerations carried by transaction records
//!
//! Parsing is case-insensitive and total: values the dashboard does not
//! know map to `Unknown` so a single odd record cannot break a page.

use serde::{Deserialize, Serialize};

/// Transaction type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    /// Subscription into a product
    Purchase,
    /// Redemption out of a product
    Redeem,
    Unknown,
}

impl Default for TransactionType {
    fn default() -> Self {
        TransactionType::Purchase
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "purchase" => Ok(TransactionType::Purchase),
            "redeem" => Ok(TransactionType::Redeem),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Purchase => write!(f, "purchase"),
            TransactionType::Redeem => write!(f, "redeem"),
            TransactionType::Unknown => write!(f, "unknown"),
        }
    }
}

impl From<String> for TransactionType {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(TransactionType::Unknown)
    }
}

impl From<TransactionType> for String {
    fn from(t: TransactionType) -> Self {
        t.to_string()
    }
}

impl TransactionType {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Purchase => "申购（purchase）",
            TransactionType::Redeem => "赎回（redeem）",
            TransactionType::Unknown => "未知",
        }
    }
}

/// Transaction status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
    Unknown,
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Pending
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TransactionStatus::Pending),
            "processing" => Ok(TransactionStatus::Processing),
            "completed" | "success" => Ok(TransactionStatus::Completed),
            "failed" => Ok(TransactionStatus::Failed),
            "cancelled" | "canceled" => Ok(TransactionStatus::Cancelled),
            _ => Err(format!("Invalid transaction status: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Processing => write!(f, "processing"),
            TransactionStatus::Completed => write!(f, "completed"),
            TransactionStatus::Failed => write!(f, "failed"),
            TransactionStatus::Cancelled => write!(f, "cancelled"),
            TransactionStatus::Unknown => write!(f, "unknown"),
        }
    }
}

impl From<String> for TransactionStatus {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(TransactionStatus::Unknown)
    }
}

impl From<TransactionStatus> for String {
    fn from(s: TransactionStatus) -> Self {
        s.to_string()
    }
}

impl TransactionStatus {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "待处理",
            TransactionStatus::Processing => "处理中",
            TransactionStatus::Completed => "已完成",
            TransactionStatus::Failed => "失败",
            TransactionStatus::Cancelled => "已取消",
            TransactionStatus::Unknown => "未知",
        }
    }

    /// Tailwind classes for the status badge
    pub fn badge_class(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "bg-green-50 text-green-700",
            TransactionStatus::Pending | TransactionStatus::Processing => "bg-yellow-50 text-yellow-700",
            TransactionStatus::Failed => "bg-red-50 text-red-700",
            TransactionStatus::Cancelled | TransactionStatus::Unknown => "bg-gray-100 text-gray-600",
        }
    }
}

/// Payment method enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    BankCard,
    Alipay,
    WechatPay,
    Balance,
    Unknown,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::BankCard
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bank_card" | "bank_transfer" | "bank" => Ok(PaymentMethod::BankCard),
            "alipay" => Ok(PaymentMethod::Alipay),
            "wechat_pay" | "wechat" => Ok(PaymentMethod::WechatPay),
            "balance" => Ok(PaymentMethod::Balance),
            _ => Err(format!("Invalid payment method: {}", s)),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::BankCard => write!(f, "bank_card"),
            PaymentMethod::Alipay => write!(f, "alipay"),
            PaymentMethod::WechatPay => write!(f, "wechat_pay"),
            PaymentMethod::Balance => write!(f, "balance"),
            PaymentMethod::Unknown => write!(f, "unknown"),
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(PaymentMethod::Unknown)
    }
}

impl From<PaymentMethod> for String {
    fn from(m: PaymentMethod) -> Self {
        m.to_string()
    }
}

impl PaymentMethod {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::BankCard => "银行卡",
            PaymentMethod::Alipay => "支付宝",
            PaymentMethod::WechatPay => "微信支付",
            PaymentMethod::Balance => "账户余额",
            PaymentMethod::Unknown => "未知",
        }
    }
}
