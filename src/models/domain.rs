use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Public user profile
///
/// This is the shape returned by every endpoint. The password hash lives
/// only on [`UserRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(rename = "wantedSkills", default)]
    pub wanted_skills: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Minimal user with the given skill lists, everything else empty
    pub fn with_skills(id: impl Into<String>, skills: Vec<String>, wanted_skills: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            email: String::new(),
            skills,
            wanted_skills,
            goals: vec![],
            bio: String::new(),
            location: String::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

/// User as persisted in the document store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(flatten)]
    pub user: User,
    #[serde(rename = "passwordHash")]
    pub password_hash: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        record.user
    }
}

/// Name and email of a session participant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(rename = "wantedSkills", default, skip_serializing_if = "Option::is_none")]
    pub wanted_skills: Option<Vec<String>>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            skills: None,
            wanted_skills: None,
        }
    }
}

/// Direction of skill overlap between a requester and a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Each side can teach the other something
    Mutual,
    /// The candidate can teach the requester
    Teacher,
    /// The candidate wants to learn from the requester
    Student,
    /// No overlap in either direction
    #[serde(rename = "none")]
    Unmatched,
}

/// A candidate scored against a requester
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub candidate: User,
    #[serde(rename = "matchScore")]
    pub match_score: u32,
    #[serde(rename = "canTeachMe")]
    pub can_teach_me: Vec<String>,
    #[serde(rename = "canLearnFromMe")]
    pub can_learn_from_me: Vec<String>,
    #[serde(rename = "matchType")]
    pub match_type: MatchType,
}

/// A single exercise inside a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// Logged workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "type")]
    pub workout_type: String,
    pub date: NaiveDate,
    /// Minutes
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
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(SessionStatus::Scheduled),
            "completed" => Ok(SessionStatus::Completed),
            "cancelled" => Ok(SessionStatus::Cancelled),
            other => Err(format!("unknown session status: {}", other)),
        }
    }
}

/// Training session between a trainer and a trainee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    #[serde(rename = "trainerId")]
    pub trainer_id: String,
    #[serde(rename = "traineeId")]
    pub trainee_id: String,
    pub title: String,
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
    pub status: SessionStatus,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Session with participant details attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulatedSession {
    #[serde(flatten)]
    pub session: Session,
    pub trainer: Option<UserSummary>,
    pub trainee: Option<UserSummary>,
}
