/// 日志工具模块
///
/// 提供日志初始化以及格式化输出的辅助函数
use crate::config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// 优先使用 `RUST_LOG`，否则 verbose 时为 debug，默认 info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 重复初始化（例如测试中）时忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 题目生成客户端启动");
    info!("🌐 出题服务: {}", config.service_base_url);
    info!("⏱️ 上传超时: {} 秒", config.upload_timeout_secs);
    info!("{}", "=".repeat(60));
}

/// 记录上传完成信息
///
/// # 参数
/// - `file_name`: 文件名
/// - `topics`: 识别出的主题
pub fn log_upload_complete(file_name: &str, topics: &[String]) {
    info!("✓ {} 上传完成，识别出 {} 个主题", file_name, topics.len());
    for (i, topic) in topics.iter().enumerate() {
        info!("  {}. {}", i + 1, truncate_text(topic, 60));
    }
}

/// 记录题目生成完成信息
pub fn log_generation_complete(topic_count: usize, question_count: usize) {
    info!(
        "✓ 题目生成完成: {} 个主题, 共 {} 道题",
        topic_count, question_count
    );
}

/// 打印最终统计信息
///
/// # 参数
/// - `topics`: 主题数量
/// - `questions`: 题目数量
/// - `export_path`: 导出文件路径（未导出时为 None）
pub fn print_final_stats(topics: usize, questions: usize, export_path: Option<&str>) {
    info!("\n{}", "=".repeat(60));
    info!("📊 处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📚 主题: {}", topics);
    info!("📝 题目: {}", questions);
    match export_path {
        Some(path) => info!("📄 文档已保存至: {}", path),
        None => info!("📄 未导出文档"),
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_text("光合作用的过程", 4), "光合作用...");
        assert_eq!(truncate_text("short", 10), "short");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
