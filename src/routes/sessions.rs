use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use validator::Validate;

use crate::error::ApiError;
use crate::models::{
    CreateSessionRequest, MessageResponse, PopulatedSession, Session, SessionListQuery,
    SessionResponse, SessionStatus, UpdateSessionRequest, UpdateSessionStatusRequest, User,
    UserSummary,
};
use crate::routes::{new_id, parse_id, AppState};
use crate::services::repository::to_document;

/// Configure session scheduling routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/user/{user_id}", web::get().to(list_sessions))
        .route("", web::post().to(create_session))
        .route("/{id}", web::get().to(get_session))
        .route("/{id}", web::put().to(update_session))
        .route("/{id}", web::delete().to(delete_session))
        .route("/{id}/status", web::patch().to(update_status));
}

fn parse_status(status: &str) -> Result<SessionStatus, ApiError> {
    status
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid status".to_string()))
}

fn session_not_found() -> ApiError {
    ApiError::NotFound("Session not found".to_string())
}

/// Sessions the user trains or attends, soonest first
///
/// GET /api/sessions/user/{userId}?status=scheduled
async fn list_sessions(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<SessionListQuery>,
) -> Result<HttpResponse, ApiError> {
    let user_id = parse_id(&path)?;
    let status = query.status.as_deref().map(parse_status).transpose()?;

    let sessions = state.repository.list_sessions(user_id, status).await?;

    // Each participant is fetched once however many sessions they appear in
    let mut participants: HashMap<String, Option<User>> = HashMap::new();
    for session in &sessions {
        for id in [&session.trainer_id, &session.trainee_id] {
            if !participants.contains_key(id) {
                let user = state.load_user(id).await?;
                participants.insert(id.clone(), user);
            }
        }
    }

    let summary = |id: &str| {
        participants
            .get(id)
            .and_then(Option::as_ref)
            .map(UserSummary::from)
    };

    let populated: Vec<PopulatedSession> = sessions
        .into_iter()
        .map(|session| PopulatedSession {
            trainer: summary(&session.trainer_id),
            trainee: summary(&session.trainee_id),
            session,
        })
        .collect();

    Ok(HttpResponse::Ok().json(populated))
}

/// Schedule a session
///
/// POST /api/sessions
///
/// Request body:
/// ```json
/// {
///   "trainerId": "uuid",
///   "traineeId": "uuid",
///   "title": "string",
///   "skill": "string",
///   "date": "2024-05-01",
///   "startTime": "09:00",
///   "endTime": "10:00",
///   "location": "string",
///   "notes": "string"
/// }
/// ```
async fn create_session(
    state: web::Data<AppState>,
    req: web::Json<CreateSessionRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    let req = req.into_inner();
    parse_id(&req.trainer_id)?;
    parse_id(&req.trainee_id)?;

    if req.trainer_id == req.trainee_id {
        return Err(ApiError::BadRequest(
            "Trainer and trainee must be different users".to_string(),
        ));
    }

    for id in [&req.trainer_id, &req.trainee_id] {
        if state.load_user(id).await?.is_none() {
            return Err(ApiError::NotFound("User not found".to_string()));
        }
    }

    let session = Session {
        id: new_id(),
        trainer_id: req.trainer_id,
        trainee_id: req.trainee_id,
        title: req.title,
        skill: req.skill,
        date: req.date,
        start_time: req.start_time,
        end_time: req.end_time,
        location: req.location,
        notes: req.notes,
        status: SessionStatus::Scheduled,
        created_at: Some(Utc::now()),
        updated_at: None,
    };
    state.repository.insert_session(&session).await?;

    tracing::info!(
        "Scheduled session {} ({} -> {})",
        session.id,
        session.trainer_id,
        session.trainee_id
    );

    Ok(HttpResponse::Created().json(SessionResponse {
        message: "Session scheduled!".to_string(),
        session,
    }))
}

/// Session detail with the trainer's skills and the trainee's wanted skills
///
/// GET /api/sessions/{id}
async fn get_session(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;

    let session = state
        .repository
        .get_session(id)
        .await?
        .ok_or_else(session_not_found)?;

    let trainer = state.load_user(&session.trainer_id).await?.map(|user| UserSummary {
        skills: Some(user.skills.clone()),
        ..UserSummary::from(&user)
    });
    let trainee = state.load_user(&session.trainee_id).await?.map(|user| UserSummary {
        wanted_skills: Some(user.wanted_skills.clone()),
        ..UserSummary::from(&user)
    });

    Ok(HttpResponse::Ok().json(PopulatedSession {
        session,
        trainer,
        trainee,
    }))
}

/// Replace a session's editable fields
///
/// PUT /api/sessions/{id}
async fn update_session(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateSessionRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;
    req.validate()?;
    let req = req.into_inner();

    let status = req.status.as_deref().map(parse_status).transpose()?;

    let mut changes = to_document(&req)?;
    match status {
        Some(status) => {
            changes.insert("status".into(), Value::String(status.as_str().to_string()));
        }
        None => {
            changes.remove("status");
        }
    }
    changes.insert("updatedAt".into(), Value::String(Utc::now().to_rfc3339()));

    if !state.repository.update_session(id, changes).await? {
        return Err(session_not_found());
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new("Session updated!")))
}

/// DELETE /api/sessions/{id}
async fn delete_session(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;

    if !state.repository.delete_session(id).await? {
        return Err(session_not_found());
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new("Session cancelled!")))
}

/// PATCH /api/sessions/{id}/status
async fn update_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateSessionStatusRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;
    let status = parse_status(&req.status)?;

    let mut changes = crate::services::Document::new();
    changes.insert("status".into(), Value::String(status.as_str().to_string()));
    changes.insert("updatedAt".into(), Value::String(Utc::now().to_rfc3339()));

    if !state.repository.update_session(id, changes).await? {
        return Err(session_not_found());
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "Session {} successfully",
        status.as_str()
    ))))
}
