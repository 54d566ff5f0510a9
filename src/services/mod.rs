//! 业务逻辑服务模块
//!
//! 封装本地行情数据的查询逻辑

pub mod price;

pub use price::PriceLookupService;
