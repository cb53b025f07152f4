//! kabutec 筛选工具入口
//!
//! 依次抓取内置（或 config.json 中配置）的数据源，结果写入 CSV

use env_logger::Env;

use kabutec_screener::config::AppConfig;
use kabutec_screener::services::Screener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统，默认日志级别为 info
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::load();
    let screener = Screener::new(config)?;

    let path = screener.run().await?;
    println!("✅ 完成，数据已写入 {}.", path.display());
    Ok(())
}
