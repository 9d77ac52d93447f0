//! Settings page rendering - Full page endpoints

use txweb_utils::escape_html;

use crate::AppState;

pub async fn page_settings(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let config = state.config.masked();

    let page_sizes = config
        .pagination
        .page_size_options
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" / ");

    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>设置</h2></div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>服务器设置</h3>
            <div class='grid grid-cols-2 gap-4 mb-4'>
                <div><p class='text-sm text-gray-500'>主机地址</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>端口</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>接口设置</h3>
            <div class='grid grid-cols-2 gap-4 mb-4'>
                <div><p class='text-sm text-gray-500'>接口地址</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>访问令牌</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>超时（秒）</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>详情重试次数</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>分页设置</h3>
            <div class='grid grid-cols-2 gap-4 mb-4'>
                <div><p class='text-sm text-gray-500'>每页记录数</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>可选条数</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6'>
            <h3 class='text-lg font-semibold mb-4'>日志</h3>
            <div><p class='text-sm text-gray-500'>日志级别</p><p class='font-medium'>{}</p></div>
        </div>"#,
        escape_html(&config.server.host),
        config.server.port,
        escape_html(&config.api.base_url),
        config.api.token.as_deref().unwrap_or("未设置"),
        config.api.timeout_secs,
        config.api.detail_retry_attempts,
        config.pagination.page_size,
        page_sizes,
        escape_html(&config.logging.level)
    );

    axum::response::Html(crate::page_response(&headers, "设置", "/settings", &inner_content))
}
