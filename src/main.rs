//! 本地行情查询服务
//!
//! 从本地 JSONL 数据集读取历史 OHLCV，通过 HTTP 工具接口对外提供查询

mod config;     // 配置加载
mod error;      // 查询错误类型
mod handlers;   // HTTP 请求处理器
mod models;     // 数据模型定义
mod services;   // 查询逻辑

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use crate::config::AppConfig;
use crate::services::PriceLookupService;

/// 应用程序入口
///
/// 默认监听 0.0.0.0:8003，端口可通过 GETPRICE_HTTP_PORT 覆盖
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 初始化日志系统，默认日志级别为 info
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::load();

    let data_path = config.resolved_data_path();
    if !data_path.is_file() {
        log::warn!("数据文件不存在: {}，查询将返回错误", data_path.display());
    }

    let service = web::Data::new(PriceLookupService::new(data_path.clone(), config.config_source()));

    log::info!("启动本地行情查询服务，数据文件: {}", data_path.display());
    log::info!("监听地址: {}", config.bind_addr());

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())  // 请求日志
            .app_data(service.clone())
            .configure(handlers::config)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(config.bind_addr())?.run().await
}
