//! 本地行情查询服务
//!
//! 根据日期字符串判断日线/小时线，校验格式后顺序扫描本地 JSONL 数据集

mod granularity;
mod local;

pub use granularity::Granularity;
pub use local::PriceLookupService;
