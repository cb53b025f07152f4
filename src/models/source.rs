//! 数据源定义

use serde::{Deserialize, Serialize};

use super::table::FilterSpec;

/// 一个比较表查询，对应一种筛选指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// 数据来源名称，写入输出的最后一列
    pub name: String,
    /// 比较表地址，查询参数决定页面渲染哪些列
    pub url: String,
    /// 第四列筛选的列位置，负数表示不启用
    #[serde(default = "default_fourth_column_index")]
    pub fourth_column_index: i32,
    /// 第四列阈值
    #[serde(default)]
    pub fourth_column_threshold: Option<f64>,
    /// 是否拆分 "代码 / 公司名" 列
    #[serde(default = "default_split_second_column")]
    pub split_second_column: bool,
}

fn default_fourth_column_index() -> i32 { -1 }
fn default_split_second_column() -> bool { true }

impl SourceDescriptor {
    pub fn new(name: &str, url: &str, fourth_column_index: i32, fourth_column_threshold: Option<f64>) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            fourth_column_index,
            fourth_column_threshold,
            split_second_column: true,
        }
    }

    pub fn filter(&self) -> FilterSpec {
        FilterSpec {
            column_index: self.fourth_column_index,
            threshold: self.fourth_column_threshold,
        }
    }
}
