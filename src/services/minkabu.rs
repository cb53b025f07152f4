//! minkabu 分析师共识判断
//!
//! 对接 https://s.minkabu.jp/stock/<code>/analyst_consensus，
//! 从固定的页面结构位置取出判断标签（如 "買い"、"中立"）

use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use crate::config::CODE_PLACEHOLDER;
use crate::error::ScrapeError;
use crate::models::NOT_AVAILABLE;

use super::http::fetch_html;

/// 判断标签所在位置
static JUDGMENT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(
        "#contents > div:nth-of-type(2) > div:nth-of-type(3) > div > div:nth-of-type(1) \
         > div:nth-of-type(1) > div > div:nth-of-type(1) > a",
    )
    .expect("Failed to parse judgment selector")
});

/// 用股票代码填充地址模板
pub fn judgment_url(template: &str, stock_code: &str) -> Result<Url, ScrapeError> {
    Ok(Url::parse(&template.replace(CODE_PLACEHOLDER, stock_code))?)
}

/// 抓取单只股票的判断标签
pub async fn fetch_judgment(
    client: &Client,
    template: &str,
    stock_code: &str,
) -> Result<String, ScrapeError> {
    let url = judgment_url(template, stock_code)?;
    let html = fetch_html(client, url).await?;
    parse_judgment(&html).ok_or_else(|| ScrapeError::JudgmentNotFound(stock_code.to_string()))
}

/// 抓取判断标签，任何失败都返回 "N/A"
pub async fn fetch_judgment_or_default(client: &Client, template: &str, stock_code: &str) -> String {
    match fetch_judgment(client, template, stock_code).await {
        Ok(judgment) => judgment,
        Err(e) => {
            log::debug!("{} 判断获取失败: {}", stock_code, e);
            NOT_AVAILABLE.to_string()
        }
    }
}

/// 取匹配位置下第一个直接文本节点
pub fn parse_judgment(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&JUDGMENT_SELECTOR)
        .flat_map(|anchor| anchor.children().filter_map(|node| node.value().as_text().map(|t| t.trim().to_string())))
        .next()
}
