use crate::config::Config;
use crate::models::Row;
/// 日志工具模块
///
/// 提供日志初始化和格式化输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info。
/// 重复调用不会报错（测试里会多次初始化）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 音频批量评分");
    info!("🌐 评分接口: {}", config.endpoint_url());
    info!("{}", "=".repeat(60));
}

/// 记录提交开始
pub fn log_submission_start(file_count: usize, reference_answer: &str) {
    info!("📤 提交 {} 个音频评分", file_count);
    info!("📝 参考答案: {}", truncate_text(reference_answer, 80));
}

/// 记录提交成功
///
/// # 参数
/// - `result_count`: 服务返回的结果数
/// - `updated_rows`: 实际更新的行数
pub fn log_submission_success(result_count: usize, updated_rows: usize) {
    info!("✓ 评分完成: 收到 {} 条结果，更新 {} 行", result_count, updated_rows);
}

/// 打印最终结果
pub fn print_final_rows(rows: &[Row]) {
    info!("\n{}", "=".repeat(60));
    info!("📊 评分结果");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    for (i, row) in rows.iter().enumerate() {
        info!("{}. {}", i + 1, row);
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
