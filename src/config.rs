//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，缺省时使用内置的四个筛选数据源

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::SourceDescriptor;

/// 判断标签地址中股票代码的占位符
pub const CODE_PLACEHOLDER: &str = "{code}";

/// 比较表接口
const KABUTEC_COMPARE_URL: &str = "https://www.kabutec.jp/contents/compare/com.php";

/// 判断抓取失败时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JudgmentErrorPolicy {
    /// 写入 "N/A"
    Default,
    /// 丢弃该行
    Skip,
    /// 中止本次运行
    Abort,
}

/// 数据源表格抓取失败时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceErrorPolicy {
    /// 中止本次运行，不写出文件
    Abort,
    /// 记录警告并继续下一个数据源
    Skip,
}

/// 输出文件编码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputEncoding {
    /// 带 BOM 的 UTF-8，Excel 可直接打开
    #[serde(rename = "utf-8-sig")]
    Utf8Bom,
    #[serde(rename = "utf-8")]
    Utf8,
}

/// 判断标签配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgmentConfig {
    /// 个股页面地址模板，`{code}` 会被替换为股票代码
    #[serde(default = "default_judgment_url_template")]
    pub url_template: String,
    #[serde(default = "default_judgment_error_policy")]
    pub on_error: JudgmentErrorPolicy,
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 输出路径，每次运行覆盖
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    #[serde(default = "default_output_encoding")]
    pub encoding: OutputEncoding,
}

/// HTTP 客户端配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    /// 请求超时时间（秒），为空则不限制
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// 自定义 User-Agent，为空则使用客户端默认值
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 按顺序处理的数据源
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceDescriptor>,
    #[serde(default)]
    pub judgment: JudgmentConfig,
    /// 每次抓取判断标签后的固定等待（毫秒）
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default = "default_source_error_policy")]
    pub on_source_error: SourceErrorPolicy,
}

// 默认值函数
fn default_judgment_url_template() -> String {
    "https://s.minkabu.jp/stock/{code}/analyst_consensus".to_string()
}
fn default_judgment_error_policy() -> JudgmentErrorPolicy { JudgmentErrorPolicy::Default }
fn default_output_path() -> PathBuf { PathBuf::from("kabutec_stocks.csv") }
fn default_output_encoding() -> OutputEncoding { OutputEncoding::Utf8Bom }
fn default_throttle_ms() -> u64 { 500 }
fn default_source_error_policy() -> SourceErrorPolicy { SourceErrorPolicy::Abort }

fn default_sources() -> Vec<SourceDescriptor> {
    vec![
        SourceDescriptor::new(
            "RSI",
            &format!("{}?col1=20&scol1=0&col2=2&scol2=0&col3=3&scol3=0", KABUTEC_COMPARE_URL),
            3,
            Some(20.0),
        ),
        SourceDescriptor::new(
            "200日均线",
            &format!("{}?col1=10&scol1=0&col2=2&scol2=0&col3=3&scol3=0&market=0", KABUTEC_COMPARE_URL),
            -1,
            None,
        ),
        SourceDescriptor::new(
            "MACD",
            &format!("{}?col1=14&scol1=0&col2=2&scol2=0&col3=3&scol3=0", KABUTEC_COMPARE_URL),
            -1,
            None,
        ),
        SourceDescriptor::new(
            "配当",
            &format!("{}?col1=28&scol1=1&col2=2&scol2=0&col3=3&scol3=0", KABUTEC_COMPARE_URL),
            -1,
            None,
        ),
    ]
}

impl Default for JudgmentConfig {
    fn default() -> Self {
        Self {
            url_template: default_judgment_url_template(),
            on_error: default_judgment_error_policy(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            encoding: default_output_encoding(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            judgment: JudgmentConfig::default(),
            throttle_ms: default_throttle_ms(),
            output: OutputConfig::default(),
            http: HttpConfig::default(),
            on_source_error: default_source_error_policy(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置，优先从文件，失败则使用默认值
    pub fn load() -> Self {
        let config_paths = ["config.json", "config/config.json"];

        for path in config_paths {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        log::info!("从 {} 加载配置成功", path);
                        return config;
                    }
                    Err(e) => {
                        log::warn!("加载配置文件 {} 失败: {}", path, e);
                    }
                }
            }
        }

        log::info!("使用默认配置");
        Self::default()
    }
}
