use actix_web::{web, HttpResponse, Result};
use crate::models::{ApiResponse, HealthStatus};
use crate::services::PriceLookupService;

pub async fn health_check(service: web::Data<PriceLookupService>) -> Result<HttpResponse> {
    let path = service.data_path();
    let status = HealthStatus {
        data_path: path.display().to_string(),
        data_available: path.is_file(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(status)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
