use actix_web::{web, HttpResponse, Responder};

use crate::core::SKILL_CATALOG;
use crate::models::{HealthResponse, SkillsResponse};
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/skills", web::get().to(list_skills));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = match state.repository.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Store health check failed: {}", e);
            false
        }
    };

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Selectable skills
///
/// GET /api/skills
async fn list_skills() -> impl Responder {
    HttpResponse::Ok().json(SkillsResponse {
        skills: SKILL_CATALOG.iter().map(|s| s.to_string()).collect(),
    })
}
