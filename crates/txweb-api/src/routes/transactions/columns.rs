//! Column definitions for the transactions table
//!
//! Cells return escaped HTML. The trailing action column opens the
//! detail dialog and cannot be hidden.

use txweb_core::Transaction;
use txweb_utils::{escape_html, format_number};

pub const ACTIONS_KEY: &str = "actions";

/// One table column
pub struct Column {
    pub key: &'static str,
    pub title: &'static str,
    /// Whether the view options may hide it
    pub hideable: bool,
    pub align_right: bool,
    render: fn(&Transaction) -> String,
}

impl Column {
    pub fn cell(&self, tx: &Transaction) -> String {
        (self.render)(tx)
    }
}

/// Columns of the transactions table, in display order
pub fn transaction_columns() -> Vec<Column> {
    vec![
        Column { key: "transactionId", title: "交易ID", hideable: true, align_right: false, render: cell_id },
        Column { key: "customer", title: "客户", hideable: true, align_right: false, render: cell_customer },
        Column { key: "product", title: "产品", hideable: true, align_right: false, render: cell_product },
        Column { key: "transactionType", title: "交易类型", hideable: true, align_right: false, render: cell_type },
        Column { key: "quantity", title: "数量", hideable: true, align_right: true, render: cell_quantity },
        Column { key: "unitPrice", title: "单价", hideable: true, align_right: true, render: cell_unit_price },
        Column { key: "totalAmount", title: "总金额", hideable: true, align_right: true, render: cell_total },
        Column { key: "transactionStatus", title: "状态", hideable: true, align_right: false, render: cell_status },
        Column { key: "paymentMethod", title: "支付方式", hideable: true, align_right: false, render: cell_payment },
        Column { key: "createdAt", title: "创建时间", hideable: true, align_right: false, render: cell_created },
        Column { key: ACTIONS_KEY, title: "操作", hideable: false, align_right: false, render: cell_actions },
    ]
}

fn cell_id(tx: &Transaction) -> String {
    format!("<span class='font-mono text-xs'>{}</span>", escape_html(&tx.transaction_id))
}

fn cell_customer(tx: &Transaction) -> String {
    escape_html(tx.customer_display())
}

fn cell_product(tx: &Transaction) -> String {
    escape_html(tx.product_display())
}

fn cell_type(tx: &Transaction) -> String {
    escape_html(tx.transaction_type.label())
}

fn cell_quantity(tx: &Transaction) -> String {
    format_number(tx.quantity)
}

fn cell_unit_price(tx: &Transaction) -> String {
    format_number(tx.unit_price)
}

fn cell_total(tx: &Transaction) -> String {
    format!("<span class='font-medium'>{}</span>", format_number(tx.total_amount))
}

fn cell_status(tx: &Transaction) -> String {
    format!(
        "<span class='px-2 py-0.5 rounded text-xs {}'>{}</span>",
        tx.transaction_status.badge_class(),
        tx.transaction_status.label()
    )
}

fn cell_payment(tx: &Transaction) -> String {
    tx.payment_method.label().to_string()
}

fn cell_created(tx: &Transaction) -> String {
    escape_html(&txweb_core::time::format_timestamp(&tx.created_at))
}

fn cell_actions(tx: &Transaction) -> String {
    format!(
        r#"<button class='text-indigo-600 hover:underline text-sm' onclick='showDetailLoading()' hx-get='/transactions/detail?transactionId={}' hx-target='#tx-detail-body' hx-swap='innerHTML' hx-sync='#tx-table:replace'>查看详情</button>"#,
        escape_html(&urlencoding::encode(&tx.transaction_id))
    )
}
