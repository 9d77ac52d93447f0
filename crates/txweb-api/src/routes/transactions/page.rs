//! Transactions page rendering
//!
//! Endpoints:
//! - page_transactions: Main transactions page
//!
//! Helper functions:
//! - render_list: Table, view options and pagination footer (the list fragment)
//! - render_detail_body: Detail dialog content for a `DetailState`
//!
//! Renderers only read what they are given; the `Dashboard` in `AppState`
//! owns rows and pagination numbers.

use txweb_core::time::format_timestamp;
use txweb_core::{DetailState, PaginationMeta, TableViewState, Transaction};
use txweb_utils::{escape_html, format_number};

use super::api::{list_fragment, FetchMode};
use super::columns::{transaction_columns, Column};
use crate::AppState;

/// Transactions page - filter bar, list and detail dialog
pub async fn page_transactions(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let search_query = {
        let mut dashboard = state.dashboard.write().await;
        // A fresh page load starts with the dialog closed
        dashboard.view.close_detail();
        dashboard.view.search_query().to_string()
    };
    let list_html = list_fragment(&state, FetchMode::IfStale).await;

    let inner_content = format!(
        r#"<div class='mb-6 flex items-center justify-between'>
            <h2 class='text-2xl font-bold'>交易记录</h2>
            <span id='tx-indicator' class='htmx-indicator text-sm text-gray-500'>加载中...</span>
        </div>
        {}
        <div id='transactions-content' class='relative flex flex-col gap-4'>{}</div>
        {}"#,
        render_toolbar(&search_query),
        list_html,
        render_detail_modal()
    );

    axum::response::Html(crate::page_response(&headers, "交易记录", "/transactions", &inner_content))
}

/// Filter input plus query and refresh buttons
pub fn render_toolbar(search_query: &str) -> String {
    format!(
        r#"<div class='mb-6 flex items-center gap-3 flex-wrap'>
            <div class='relative max-w-sm min-w-[200px] flex-1'>
                <input id='tx-search' type='text' name='productId' placeholder='按产品ID搜索...' value='{}'
                    class='w-full px-3 py-2 border rounded-lg bg-white'
                    hx-post='/transactions/draft' hx-trigger='keyup changed delay:300ms, search' hx-swap='none'>
            </div>
            <button class='px-3 py-2 text-sm rounded-lg bg-indigo-600 text-white hover:bg-indigo-700'
                hx-post='/transactions/query' hx-include='#tx-search' hx-target='#transactions-content' hx-indicator='#tx-indicator'>查询</button>
            <button class='px-3 py-2 text-sm border rounded-lg bg-white hover:bg-gray-50'
                hx-post='/transactions/refresh' hx-target='#transactions-content' hx-indicator='#tx-indicator'>刷新</button>
        </div>"#,
        escape_html(search_query)
    )
}

/// List fragment: toast, view options, table and pagination footer
#[allow(clippy::too_many_arguments)]
pub fn render_list(
    view: &TableViewState,
    rows: &[Transaction],
    loading: bool,
    enabled: bool,
    meta: &PaginationMeta,
    page_size_options: &[u32],
    toast: Option<&str>,
) -> String {
    let columns: Vec<Column> = transaction_columns()
        .into_iter()
        .filter(|c| !view.is_hidden(c.key))
        .collect();

    let mut html = String::new();
    if let Some(message) = toast {
        html.push_str(&render_toast(message));
    }
    html.push_str(&format!(
        "<div class='flex justify-end'>{}</div>",
        render_view_options(view)
    ));
    html.push_str(&render_table(&columns, rows, loading, enabled));
    html.push_str(&render_pagination(meta, loading, page_size_options));
    html
}

fn render_table(columns: &[Column], rows: &[Transaction], loading: bool, enabled: bool) -> String {
    let mut html = String::from(
        "<div class='overflow-hidden rounded-lg border bg-white'><table id='tx-table' class='w-full text-sm'><thead class='bg-gray-50'><tr>",
    );
    for column in columns {
        html.push_str(&format!(
            "<th class='px-3 py-2 font-medium text-gray-600 {}' data-column='{}'>{}</th>",
            if column.align_right { "text-right" } else { "text-left" },
            column.key,
            column.title
        ));
    }
    html.push_str("</tr></thead><tbody>");

    if rows.is_empty() {
        let message = if loading {
            "加载中..."
        } else if !enabled {
            "请输入查询条件后点击“查询”"
        } else {
            "暂无交易记录"
        };
        html.push_str(&format!(
            "<tr><td colspan='{}' class='text-center py-12 text-gray-500'>{}</td></tr>",
            columns.len().max(1),
            message
        ));
    }

    for tx in rows {
        html.push_str(&format!(
            "<tr class='border-t hover:bg-gray-50' data-row-id='{}'>",
            escape_html(&tx.transaction_id)
        ));
        for column in columns {
            html.push_str(&format!(
                "<td class='px-3 py-2 {}'>{}</td>",
                if column.align_right { "text-right" } else { "" },
                column.cell(tx)
            ));
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table></div>");
    html
}

/// Column visibility menu
fn render_view_options(view: &TableViewState) -> String {
    let mut items = String::new();
    for column in transaction_columns().iter().filter(|c| c.hideable) {
        items.push_str(&format!(
            r#"<label class='flex items-center gap-2 px-2 py-1 hover:bg-gray-50 cursor-pointer'>
                <input type='checkbox' {} hx-post='/transactions/columns/{}/toggle' hx-target='#transactions-content'>
                <span>{}</span>
            </label>"#,
            if view.is_hidden(column.key) { "" } else { "checked" },
            column.key,
            column.title
        ));
    }

    format!(
        r#"<details class='relative'>
            <summary class='px-3 py-1.5 text-sm border rounded-lg bg-white cursor-pointer'>显示列</summary>
            <div class='absolute right-0 z-10 mt-1 w-40 p-1 bg-white border rounded-lg shadow-lg text-sm'>{}</div>
        </details>"#,
        items
    )
}

/// Footer: totals, page navigation, jump and page-size selector
fn render_pagination(meta: &PaginationMeta, loading: bool, page_size_options: &[u32]) -> String {
    let nav_button = |label: &str, page: u32, enabled: bool| {
        format!(
            r#"<button {} hx-post='/transactions/page' hx-vals='{{"page": {}}}' hx-target='#transactions-content' hx-indicator='#tx-indicator' class='px-3 py-1 border rounded bg-white hover:bg-gray-100 disabled:opacity-50'>{}</button>"#,
            if enabled && !loading { "" } else { "disabled" },
            page,
            label
        )
    };

    let mut options: Vec<u32> = page_size_options.to_vec();
    if !options.contains(&meta.limit) {
        options.push(meta.limit);
        options.sort_unstable();
    }
    let size_options: String = options
        .iter()
        .map(|n| {
            format!(
                "<option value='{}' {}>{} 条/页</option>",
                n,
                if *n == meta.limit { "selected" } else { "" },
                n
            )
        })
        .collect();

    format!(
        r#"<div class='flex items-center justify-between flex-wrap gap-4'>
            <span class='text-sm text-gray-500'>共 {} 条记录，第 {} / {} 页</span>
            <div class='flex items-center gap-2'>
                <select name='limit' class='px-2 py-1 text-sm border rounded bg-white' hx-post='/transactions/page-size' hx-trigger='change' hx-target='#transactions-content' hx-indicator='#tx-indicator'>{}</select>
                {}
                {}
                <form class='flex items-center gap-1 text-sm text-gray-600' hx-post='/transactions/page' hx-target='#transactions-content' hx-indicator='#tx-indicator'>
                    第 <input type='number' name='page' min='1' max='{}' value='{}' class='w-16 text-center border rounded px-2 py-1'> 页
                    <button type='submit' class='px-3 py-1 border rounded bg-blue-50 hover:bg-blue-100 text-blue-600'>跳转</button>
                </form>
                {}
                {}
            </div>
        </div>"#,
        format_number(meta.total),
        meta.page,
        meta.total_pages,
        size_options,
        nav_button("首页", 1, meta.has_prev()),
        nav_button("上一页", meta.page.saturating_sub(1).max(1), meta.has_prev()),
        meta.total_pages,
        meta.page,
        nav_button("下一页", meta.page.saturating_add(1), meta.has_next()),
        nav_button("末页", meta.total_pages, meta.has_next()),
    )
}

/// Transient error notification
pub fn render_toast(message: &str) -> String {
    format!(
        r#"<div id='tx-toast' role='alert' class='fixed top-4 right-4 z-50 px-4 py-3 rounded-lg shadow-lg bg-red-600 text-white text-sm'><span class='tx-toast-message'>{}</span></div>
        <script>setTimeout(function() {{ var t = document.getElementById('tx-toast'); if (t) t.remove(); }}, 4000);</script>"#,
        escape_html(message)
    )
}

/// Dialog shell; its body is filled by the detail endpoint
fn render_detail_modal() -> String {
    format!(
        r#"<div id='tx-detail-modal' class='hidden fixed inset-0 z-40 bg-black/40 flex items-center justify-center'>
            <div class='bg-white rounded-xl shadow-lg w-full max-w-2xl max-h-[85vh] overflow-y-auto p-6'>
                <div class='flex items-start justify-between mb-4'>
                    <div>
                        <h3 class='text-lg font-semibold'>交易详情</h3>
                        <p class='text-sm text-gray-500'>查看交易的完整信息。</p>
                    </div>
                    <button class='text-gray-400 hover:text-gray-600' hx-post='/transactions/detail/close' hx-swap='none' onclick='hideDetail()'>✕</button>
                </div>
                <div id='tx-detail-body'></div>
            </div>
        </div>
        <template id='tx-detail-loading'>{}</template>
        <script>
        function showDetailLoading() {{
            document.getElementById('tx-detail-body').innerHTML = document.getElementById('tx-detail-loading').innerHTML;
            document.getElementById('tx-detail-modal').classList.remove('hidden');
        }}
        function hideDetail() {{
            document.getElementById('tx-detail-modal').classList.add('hidden');
            document.getElementById('tx-detail-body').innerHTML = '';
        }}
        </script>"#,
        render_detail_body(&DetailState::Loading)
    )
}

/// Detail dialog content, driven only by the fetch state
pub fn render_detail_body(state: &DetailState) -> String {
    match state {
        DetailState::NotSelected => "<div class='text-gray-500 text-sm'>未选择交易</div>".to_string(),
        DetailState::Loading => "<div class='text-gray-500 text-sm'>加载中...</div>".to_string(),
        DetailState::Failed(message) => format!(
            "<div class='text-red-600 text-sm'>加载失败：<span class='tx-error-message'>{}</span></div>",
            escape_html(message)
        ),
        DetailState::Empty => String::new(),
        DetailState::Loaded(tx) => render_detail_fields(tx),
    }
}

fn render_detail_fields(tx: &Transaction) -> String {
    let field = |label: &str, value: &str, wide: bool, extra_class: &str| {
        format!(
            "<div class='{}'><div class='text-gray-500 text-xs'>{}</div><div class='text-sm {}'>{}</div></div>",
            if wide { "md:col-span-2" } else { "" },
            label,
            extra_class,
            escape_html(value)
        )
    };

    let mut html = String::from("<div class='grid grid-cols-1 gap-3 md:grid-cols-2'>");
    html.push_str(&field("交易ID", &tx.transaction_id, true, "font-medium"));
    html.push_str(&field("客户", tx.customer_display(), false, ""));
    html.push_str(&field("产品", tx.product_display(), false, ""));
    html.push_str(&field("交易类型", tx.transaction_type.label(), false, ""));
    html.push_str(&field("数量", &tx.quantity.to_string(), false, ""));
    html.push_str(&field("单价", &tx.unit_price.to_string(), false, ""));
    html.push_str(&field("总金额", &tx.total_amount.to_string(), false, ""));
    html.push_str(&field("状态", tx.transaction_status.label(), false, ""));
    html.push_str(&field("支付方式", tx.payment_method.label(), false, ""));
    if let Some(date) = tx.expected_maturity_date.as_deref().filter(|d| !d.is_empty()) {
        html.push_str(&field("预期到期日期", date, false, ""));
    }
    if let Some(rate) = tx.actual_return_rate {
        html.push_str(&field("实际收益率", &rate.to_string(), false, ""));
    }
    if let Some(completed) = tx.completed_at.as_deref().filter(|d| !d.is_empty()) {
        html.push_str(&field("完成时间", completed, false, ""));
    }
    html.push_str(&field("创建时间", &format_timestamp(&tx.created_at), false, ""));
    html.push_str(&field("更新时间", &format_timestamp(&tx.updated_at), false, ""));
    if let Some(notes) = tx.notes_text() {
        html.push_str(&field("备注", notes, true, "whitespace-pre-wrap"));
    }
    html.push_str("</div>");
    html
}
