// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 默认过滤器: 本 crate info,其余 warn
const DEFAULT_FILTER: &str = "warn,drill_blast_engine=info";

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: warn,drill_blast_engine=info）
///   例如: RUST_LOG=debug 或 RUST_LOG=drill_blast_engine=trace
/// - LOG_FORMAT=json: 输出 JSON 行日志（便于采集）
///
/// 日志写到 stderr,stdout 只留给命令行报告
///
/// # 示例
/// ```no_run
/// use drill_blast_engine::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    // 已有全局 subscriber 时保持原样
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别,便于调试; 可重复调用
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_is_idempotent() {
        init_test();
        init_test();
        tracing::info!("logging ready");
    }
}
