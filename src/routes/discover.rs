use actix_web::{web, HttpResponse};

use crate::core::{compute_matches, discover_filter, skill_overlap_filter};
use crate::error::ApiError;
use crate::models::DiscoverQuery;
use crate::routes::{parse_id, AppState};

/// Configure partner discovery routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/discover/{user_id}", web::get().to(discover_users))
        .route("/matches/{user_id}", web::get().to(find_matches))
        .route("/{id}", web::get().to(get_user));
}

/// Browse other users
///
/// GET /api/discover/discover/{userId}?skill=Yoga&location=rapids
async fn discover_users(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<DiscoverQuery>,
) -> Result<HttpResponse, ApiError> {
    let user_id = parse_id(&path)?;

    let users = state
        .repository
        .find_users(discover_filter(user_id, &query))
        .await?;

    tracing::debug!("Discovered {} users for {}", users.len(), user_id);

    Ok(HttpResponse::Ok().json(users))
}

/// Skill-matched training partners
///
/// GET /api/discover/matches/{userId}
///
/// Candidates are pre-filtered in the store to users with any overlap, then
/// scored and ranked by the matcher.
async fn find_matches(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = parse_id(&path)?;

    let requester = state
        .load_user(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let candidates = state
        .repository
        .find_users(skill_overlap_filter(&requester))
        .await?;
    let total_candidates = candidates.len();

    let matches = compute_matches(Some(&requester), candidates)?;

    tracing::info!(
        "Returning {} matches for user {} (from {} candidates)",
        matches.len(),
        user_id,
        total_candidates
    );

    Ok(HttpResponse::Ok().json(matches))
}

/// GET /api/discover/{id}
async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;

    let user = state
        .load_user(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(user))
}
