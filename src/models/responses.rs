use serde::{Deserialize, Serialize};

use crate::models::domain::{Session, User, Workout};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Plain acknowledgement, e.g. `{"message": "Workout deleted!"}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Response for register and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutResponse {
    pub message: String,
    pub workout: Workout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub message: String,
    pub session: Session,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsResponse {
    pub skills: Vec<String>,
}
