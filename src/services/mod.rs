//! 业务逻辑服务模块
//!
//! 封装数据获取、筛选和导出逻辑

pub mod http;      // HTTP 客户端与页面解码
pub mod kabutec;   // 比较表抓取
pub mod minkabu;   // 分析师判断抓取
pub mod export;    // CSV 导出
pub mod screener;  // 调度

pub use screener::Screener;
