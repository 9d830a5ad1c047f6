/// 日志工具模块
///
/// 提供 tracing 订阅器初始化和日志文本辅助函数
use tracing_subscriber::EnvFilter;

/// 初始化全局日志订阅器
///
/// 默认 info 级别，可通过 RUST_LOG 环境变量覆盖；
/// 重复调用（例如测试里）不会报错
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
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
    fn test_truncate_long_text() {
        let text = "网络安全".repeat(20);
        let truncated = truncate_text(&text, 10);
        assert_eq!(truncated.chars().count(), 13); // 10 个字符 + "..."
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(truncate_text("短文本", 10), "短文本");
    }
}
