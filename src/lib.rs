//! FitSwap - training partner discovery and scheduling service
//!
//! The core of this library is the skill matcher: given a requester's
//! teachable and wanted skills, it scores a pool of other users by
//! bidirectional overlap. Around it sit a pluggable document store, a
//! two-tier profile cache and the actix-web HTTP API.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{calculate_skill_overlap, compute_matches, MatchError, SkillOverlap, SKILL_CATALOG};
pub use models::{MatchResult, MatchType, User};
