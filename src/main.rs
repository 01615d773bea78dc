use anyhow::Result;
use orphanet_pubmed::{logger, run_fetch, Config, PubMedClient};
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logger::init(&config.fetch_log_file, config.verbose_logging)?;

    let client = PubMedClient::new(&config)?;

    if let Err(e) = run_fetch(&config, client).await {
        error!("文献检索任务出错: {:#}", e);
        return Err(e.into());
    }

    Ok(())
}
