// Model exports
pub mod domain;
pub mod filter;
pub mod requests;
pub mod responses;

pub use domain::{
    Exercise, MatchResult, MatchType, PopulatedSession, Session, SessionStatus, User, UserRecord,
    UserSummary, Workout,
};
pub use filter::{Document, Filter};
pub use requests::{
    CreateSessionRequest, CreateWorkoutRequest, DiscoverQuery, LoginRequest, RegisterRequest,
    SessionListQuery, UpdateProfileRequest, UpdateSessionRequest, UpdateSessionStatusRequest,
    UpdateWorkoutRequest,
};
pub use responses::{
    ErrorResponse, HealthResponse, MessageResponse, SessionResponse, SkillsResponse, UserResponse,
    WorkoutResponse,
};
