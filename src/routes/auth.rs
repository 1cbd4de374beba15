use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::Value;
use validator::Validate;

use crate::core::{check_credentials, hash_password, is_catalog_skill};
use crate::error::ApiError;
use crate::models::{
    LoginRequest, MessageResponse, RegisterRequest, UpdateProfileRequest, User, UserRecord,
    UserResponse,
};
use crate::routes::{new_id, parse_id, AppState};
use crate::services::{Document, StoreError};

fn user_exists() -> ApiError {
    ApiError::Conflict("User already exists with this email!".to_string())
}

/// Configure account routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .route("/profile/{id}", web::get().to(get_profile))
        .route("/profile/{id}", web::put().to(update_profile));
}

/// Register a new account
///
/// POST /api/auth/register
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "email": "string",
///   "password": "string",
///   "skills": ["string"],
///   "wantedSkills": ["string"],
///   "goals": ["string"]
/// }
/// ```
async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    let req = req.into_inner();

    if state.repository.find_user_by_email(&req.email).await?.is_some() {
        return Err(user_exists());
    }

    log_custom_skills(&req.skills, &req.wanted_skills);

    // Argon2 is CPU-bound; keep it off the async workers
    let password = req.password;
    let password_hash = web::block(move || hash_password(&password)).await??;

    let user = User {
        id: new_id(),
        name: req.name,
        email: req.email,
        skills: req.skills,
        wanted_skills: req.wanted_skills,
        goals: req.goals,
        bio: String::new(),
        location: String::new(),
        created_at: Some(Utc::now()),
        updated_at: None,
    };

    let record = UserRecord { user, password_hash };

    // The store enforces email uniqueness for registrations that race the check above
    state.repository.insert_user(&record).await.map_err(|e| match e {
        StoreError::Duplicate(_) => user_exists(),
        e => e.into(),
    })?;

    tracing::info!("Registered user {}", record.user.id);

    Ok(HttpResponse::Created().json(UserResponse {
        message: "User created successfully".to_string(),
        user: record.into(),
    }))
}

/// Verify credentials and return the profile
///
/// POST /api/auth/login
async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    let req = req.into_inner();

    let invalid = || ApiError::Unauthorized("Invalid email or password".to_string());

    let record = state.repository.find_user_by_email(&req.email).await?;

    // Unknown emails pay the same verification cost as wrong passwords
    let stored = record.as_ref().map(|r| r.password_hash.clone());
    let password = req.password;
    let valid = web::block(move || check_credentials(&password, stored.as_deref())).await??;

    let record = match record {
        Some(record) if valid => record,
        Some(record) => {
            tracing::info!("Failed login for user {}", record.user.id);
            return Err(invalid());
        }
        None => return Err(invalid()),
    };

    Ok(HttpResponse::Ok().json(UserResponse {
        message: "Login successful".to_string(),
        user: record.into(),
    }))
}

/// GET /api/auth/profile/{id}
async fn get_profile(
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

/// Update profile fields; absent fields are left as they are
///
/// PUT /api/auth/profile/{id}
async fn update_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;
    req.validate()?;
    let req = req.into_inner();

    log_custom_skills(
        req.skills.as_deref().unwrap_or_default(),
        req.wanted_skills.as_deref().unwrap_or_default(),
    );

    let changes = profile_changes(req);
    if !state.repository.update_user(id, changes).await? {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    state.invalidate_user(id).await;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Profile updated!")))
}

fn profile_changes(req: UpdateProfileRequest) -> Document {
    let mut changes = Document::new();

    if let Some(name) = req.name {
        changes.insert("name".into(), Value::String(name));
    }
    if let Some(bio) = req.bio {
        changes.insert("bio".into(), Value::String(bio));
    }
    if let Some(location) = req.location {
        changes.insert("location".into(), Value::String(location));
    }
    if let Some(skills) = req.skills {
        changes.insert("skills".into(), skills.into());
    }
    if let Some(wanted) = req.wanted_skills {
        changes.insert("wantedSkills".into(), wanted.into());
    }
    if let Some(goals) = req.goals {
        changes.insert("goals".into(), goals.into());
    }
    changes.insert("updatedAt".into(), Value::String(Utc::now().to_rfc3339()));

    changes
}

fn log_custom_skills(skills: &[String], wanted: &[String]) {
    for skill in skills.iter().chain(wanted).filter(|s| !is_catalog_skill(s)) {
        tracing::debug!("Skill outside catalog: {}", skill);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_changes_only_present_fields() {
        let changes = profile_changes(UpdateProfileRequest {
            bio: Some("Morning runner".to_string()),
            skills: Some(vec!["Running".to_string()]),
            ..Default::default()
        });

        assert_eq!(changes["bio"], "Morning runner");
        assert_eq!(changes["skills"], serde_json::json!(["Running"]));
        assert!(changes.contains_key("updatedAt"));
        assert!(!changes.contains_key("name"));
        assert!(!changes.contains_key("wantedSkills"));
    }
}
