//! kabutec 技术指标筛选
//!
//! 从 kabutec 比较表抓取符合条件的股票，补充 minkabu 的分析师判断，
//! 汇总写出 CSV

pub mod config;  // 配置加载
pub mod error;   // 错误类型
pub mod models;  // 数据模型定义
pub mod services; // 抓取与导出逻辑
