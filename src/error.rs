//! 抓取错误类型
//!
//! 网络层和解析层的失败统一归到 `ScrapeError`，由调度层决定跳过、兜底还是中止

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// 请求未能完成（连接失败、超时、读取响应体失败等）
    #[error("请求失败: {0}")]
    Http(#[from] reqwest::Error),

    /// 服务端返回非 2xx 状态
    #[error("HTTP 状态异常: {status} ({url})")]
    Status { status: StatusCode, url: String },

    #[error("无效的 URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// 页面中找不到分析师判断标签
    #[error("未找到判断标签: {0}")]
    JudgmentNotFound(String),
}
