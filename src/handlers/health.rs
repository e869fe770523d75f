use crate::error::AppError;
use actix_web::{HttpResponse, Result, ResponseError, web};
use sea_orm::DatabaseConnection;
use serde_json::json;

pub async fn health(pool: web::Data<DatabaseConnection>) -> Result<HttpResponse> {
    match pool.ping().await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "status": "ok",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))),
        Err(e) => Ok(AppError::from(e).error_response()),
    }
}

pub fn health_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
