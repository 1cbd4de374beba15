use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::Value;
use validator::Validate;

use crate::error::ApiError;
use crate::models::{
    CreateWorkoutRequest, MessageResponse, UpdateWorkoutRequest, Workout, WorkoutResponse,
};
use crate::routes::{new_id, parse_id, AppState};
use crate::services::repository::to_document;

/// Configure workout log routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/user/{user_id}", web::get().to(list_workouts))
        .route("", web::post().to(create_workout))
        .route("/{id}", web::get().to(get_workout))
        .route("/{id}", web::put().to(update_workout))
        .route("/{id}", web::delete().to(delete_workout));
}

/// GET /api/workouts/user/{userId}
async fn list_workouts(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = parse_id(&path)?;
    let workouts = state.repository.list_workouts(user_id).await?;
    Ok(HttpResponse::Ok().json(workouts))
}

/// Log a workout
///
/// POST /api/workouts
async fn create_workout(
    state: web::Data<AppState>,
    req: web::Json<CreateWorkoutRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    let req = req.into_inner();
    parse_id(&req.user_id)?;

    if state.repository.get_user(&req.user_id).await?.is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let workout = Workout {
        id: new_id(),
        user_id: req.user_id,
        workout_type: req.workout_type,
        date: req.date,
        duration: req.duration,
        calories_burned: req.calories_burned,
        exercises: req.exercises,
        distance: req.distance,
        notes: req.notes,
        created_at: Some(Utc::now()),
        updated_at: None,
    };
    state.repository.insert_workout(&workout).await?;

    tracing::debug!("Logged workout {} for {}", workout.id, workout.user_id);

    Ok(HttpResponse::Created().json(WorkoutResponse {
        message: "Workout logged!".to_string(),
        workout,
    }))
}

/// GET /api/workouts/{id}
async fn get_workout(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;

    let workout = state
        .repository
        .get_workout(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Workout not found".to_string()))?;

    Ok(HttpResponse::Ok().json(workout))
}

/// Replace a workout's editable fields
///
/// PUT /api/workouts/{id}
async fn update_workout(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateWorkoutRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;
    req.validate()?;

    let mut changes = to_document(&req.into_inner())?;
    changes.insert("updatedAt".into(), Value::String(Utc::now().to_rfc3339()));

    if !state.repository.update_workout(id, changes).await? {
        return Err(ApiError::NotFound("Workout not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new("Workout updated!")))
}

/// DELETE /api/workouts/{id}
async fn delete_workout(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;

    if !state.repository.delete_workout(id).await? {
        return Err(ApiError::NotFound("Workout not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new("Workout deleted!")))
}
