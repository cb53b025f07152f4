//! HTTP 抓取辅助
//!
//! 整个运行期间共用一个 `reqwest::Client`。日文站点常用 Shift_JIS / EUC-JP，
//! 响应体按 Content-Type 或页面 meta 声明的字符集解码，找不到时按 UTF-8 处理。

use std::time::Duration;

use anyhow::Result;
use encoding_rs::{Encoding, UTF_8};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, IntoUrl, StatusCode};

use crate::config::HttpConfig;
use crate::error::ScrapeError;

/// 只在文档开头查找 meta 字符集声明
const META_SNIFF_LEN: usize = 1024;

static CHARSET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([A-Za-z0-9_\-:.]+)"#).expect("Failed to compile charset regex")
});

/// 根据配置创建客户端
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(ua) = &config.user_agent {
        builder = builder.user_agent(ua.as_str());
    }
    Ok(builder.build()?)
}

/// 一次 GET 的结果，状态码不做判断
pub struct Page {
    pub status: StatusCode,
    pub url: String,
    pub body: String,
}

/// GET 页面并解码为字符串，非 2xx 状态视为失败
pub async fn fetch_html<U: IntoUrl>(client: &Client, url: U) -> Result<String, ScrapeError> {
    let page = fetch_page(client, url).await?;
    if !page.status.is_success() {
        return Err(ScrapeError::Status {
            status: page.status,
            url: page.url,
        });
    }
    Ok(page.body)
}

/// GET 页面并解码，任何状态码都返回响应体，只有传输失败才报错
pub async fn fetch_page<U: IntoUrl>(client: &Client, url: U) -> Result<Page, ScrapeError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    let url = response.url().to_string();

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    let bytes = response.bytes().await?;

    Ok(Page {
        status,
        url,
        body: decode_body(&bytes, content_type.as_deref()),
    })
}

/// 解码响应体：Content-Type 字符集 > meta 声明 > UTF-8（BOM 优先于以上全部）
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_label)
        .or_else(|| sniff_meta_charset(bytes))
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);

    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

fn charset_label(s: &str) -> Option<String> {
    CHARSET_RE
        .captures(s)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn sniff_meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(META_SNIFF_LEN)];
    let head = String::from_utf8_lossy(head);
    charset_label(&head)
}
