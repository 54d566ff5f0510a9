//! 本地行情查询处理器
//!
//! ## API 列表
//! - GET /price/local?symbol=IBM&date=2025-10-30 - 查询本地 OHLCV
//! - POST /tools/get_price_local - 工具调用入口，请求体 `{"symbol": ..., "date": ...}`
//!
//! 查询失败（格式错误、无数据等）同样返回 200，结果中带 `error` 字段

use actix_web::{web, HttpResponse, Result};
use crate::models::{ApiResponse, LookupResult, PriceQuery};
use crate::services::PriceLookupService;

/// 在阻塞线程池中执行查询（同步读文件）
async fn run_lookup(service: web::Data<PriceLookupService>, query: PriceQuery) -> HttpResponse {
    let result = web::block(move || service.lookup(&query.symbol, &query.date)).await;

    match result {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("行情查询任务执行失败: {}", e);
            let response = ApiResponse::<LookupResult>::error(e.to_string());
            HttpResponse::InternalServerError().json(response)
        }
    }
}

/// 查询本地行情
///
/// GET /api/v1/price/local
pub async fn get_price_local(
    service: web::Data<PriceLookupService>,
    query: web::Query<PriceQuery>,
) -> Result<HttpResponse> {
    Ok(run_lookup(service, query.into_inner()).await)
}

/// 工具调用入口
///
/// POST /api/v1/tools/get_price_local
pub async fn call_get_price_local(
    service: web::Data<PriceLookupService>,
    body: web::Json<PriceQuery>,
) -> Result<HttpResponse> {
    Ok(run_lookup(service, body.into_inner()).await)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/price/local", web::get().to(get_price_local))
        .route("/tools/get_price_local", web::post().to(call_get_price_local));
}
