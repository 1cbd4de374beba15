use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Exercise;

/// Request to create an account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(rename = "wantedSkills", default)]
    pub wanted_skills: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Partial profile update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub bio: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
    #[serde(rename = "wantedSkills")]
    pub wanted_skills: Option<Vec<String>>,
    pub goals: Option<Vec<String>>,
}

/// Optional filters for browsing other users
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoverQuery {
    pub skill: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateWorkoutRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(rename = "type")]
    pub workout_type: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub duration: u32,
    #[serde(rename = "caloriesBurned", default)]
    pub calories_burned: u32,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub notes: String,
}

/// Full replacement of a workout's editable fields
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateWorkoutRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "type")]
    pub workout_type: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub duration: u32,
    #[serde(rename = "caloriesBurned", default)]
    pub calories_burned: u32,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "trainerId")]
    pub trainer_id: String,
    #[validate(length(min = 1))]
    #[serde(rename = "traineeId")]
    pub trainee_id: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub skill: String,
    pub date: NaiveDate,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSessionRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub skill: String,
    pub date: NaiveDate,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub notes: String,
    /// Raw status; parsed by the handler so unknown values become a 400
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSessionStatusRequest {
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionListQuery {
    pub status: Option<String>,
}
