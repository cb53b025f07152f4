//! 筛选调度
//!
//! 依次处理每个数据源：抓取比较表，对每个保留行抓取判断标签并节流，
//! 全部数据源处理完后一次性写出 CSV。整个过程顺序执行。

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

use crate::config::{AppConfig, JudgmentErrorPolicy, SourceErrorPolicy};
use crate::models::{OutputRecord, SourceDescriptor, TableRow, NOT_AVAILABLE};

use super::export::write_records;
use super::http::build_client;
use super::kabutec::fetch_table;
use super::minkabu::{fetch_judgment, fetch_judgment_or_default};

pub struct Screener {
    client: Client,
    config: AppConfig,
}

impl Screener {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = build_client(&config.http)?;
        Ok(Self { client, config })
    }

    /// 处理全部数据源并写出文件，返回输出路径
    pub async fn run(&self) -> Result<PathBuf> {
        let records = self.collect().await?;
        let path = self.config.output.path.clone();

        write_records(&path, self.config.output.encoding, &records)?;
        log::info!("共写出 {} 条记录", records.len());
        Ok(path)
    }

    /// 按顺序处理全部数据源，返回累积的记录
    pub async fn collect(&self) -> Result<Vec<OutputRecord>> {
        let mut records = Vec::new();

        for source in &self.config.sources {
            println!("📡 正在抓取 {} ...", source.name);

            let rows = match fetch_table(&self.client, &source.url, &source.filter(), source.split_second_column).await {
                Ok(rows) => rows,
                Err(e) => match self.config.on_source_error {
                    SourceErrorPolicy::Abort => {
                        return Err(e).with_context(|| format!("数据源 {} 抓取失败: {}", source.name, source.url));
                    }
                    SourceErrorPolicy::Skip => {
                        log::warn!("跳过数据源 {}: {}", source.name, e);
                        continue;
                    }
                },
            };

            self.enrich_rows(source, rows, &mut records).await?;
        }

        Ok(records)
    }

    /// 为每个保留行抓取判断标签，按策略处理失败
    async fn enrich_rows(
        &self,
        source: &SourceDescriptor,
        rows: Vec<TableRow>,
        records: &mut Vec<OutputRecord>,
    ) -> Result<()> {
        let throttle = Duration::from_millis(self.config.throttle_ms);

        for row in rows {
            let stock_code = row.get(1).cloned().unwrap_or_else(|| NOT_AVAILABLE.to_string());
            let company_name = row.get(2).cloned().unwrap_or_else(|| NOT_AVAILABLE.to_string());

            let on_error = self.config.judgment.on_error;
            let outcome = match on_error {
                JudgmentErrorPolicy::Default => {
                    Ok(fetch_judgment_or_default(&self.client, &self.config.judgment.url_template, &stock_code).await)
                }
                JudgmentErrorPolicy::Skip | JudgmentErrorPolicy::Abort => {
                    fetch_judgment(&self.client, &self.config.judgment.url_template, &stock_code).await
                }
            };
            tokio::time::sleep(throttle).await;

            let judgment = match outcome {
                Ok(judgment) => judgment,
                Err(e) if on_error == JudgmentErrorPolicy::Abort => {
                    return Err(e).with_context(|| format!("{} 判断获取失败", stock_code));
                }
                Err(e) => {
                    log::debug!("{} 判断获取失败, 跳过: {}", stock_code, e);
                    continue;
                }
            };

            records.push(OutputRecord {
                stock_code,
                company_name,
                judgment,
                source_name: source.name.clone(),
            });
        }

        Ok(())
    }
}
