use anyhow::Result;
use orphanet_pubmed::{logger, run_extraction, Config};
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logger::init(&config.extract_log_file, config.verbose_logging)?;

    if let Err(e) = run_extraction(&config).await {
        error!("疾病提取任务出错: {:#}", e);
        return Err(e.into());
    }

    Ok(())
}
