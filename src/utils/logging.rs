/// 日志工具模块
///
/// 提供批处理任务的横幅和统计输出
use tracing::info;

/// 记录任务启动信息
///
/// # 参数
/// - `job`: 任务名称
/// - `source`: 输入来源（目录或文件）
pub fn log_startup(job: &str, source: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 {} 启动 - {}", job, chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("📁 输入: {}", source);
    info!("{}", "=".repeat(60));
}

/// 记录单个疾病的检索进度
///
/// # 参数
/// - `current`: 当前序号（从1开始）
/// - `total`: 疾病总数
/// - `name`: 疾病名
/// - `found`: 找到的文献数
pub fn log_progress(current: usize, total: usize, name: &str, found: usize) {
    info!(
        "[{}/{}] {} → {} 篇文献",
        current,
        total,
        truncate_text(name, 60),
        found
    );
}

/// 打印最终统计信息
///
/// # 参数
/// - `lines`: (标签, 数值) 列表
/// - `output_path`: 结果文件路径
pub fn print_final_stats(lines: &[(&str, usize)], output_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    for (label, count) in lines {
        info!("{}: {}", label, count);
    }
    info!("{}", "=".repeat(60));
    info!("结果已保存至: {}", output_path);
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
