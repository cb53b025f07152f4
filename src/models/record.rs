//! 输出记录

use serde::Serialize;

/// 缺失值占位
pub const NOT_AVAILABLE: &str = "N/A";

/// 输出文件表头
pub const CSV_HEADER: [&str; 4] = ["股票代码", "公司名", "判断", "数据来源"];

/// 每个数据源中每个保留行对应一条记录，跨数据源不去重
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    /// 股票代码
    pub stock_code: String,
    /// 公司名
    pub company_name: String,
    /// 分析师判断
    pub judgment: String,
    /// 数据来源名称
    pub source_name: String,
}
