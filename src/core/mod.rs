// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod password;
pub mod scoring;
pub mod skills;

pub use filters::{discover_filter, skill_overlap_filter};
pub use matcher::{compute_matches, MatchError};
pub use password::{check_credentials, hash_password, verify_password, PasswordError};
pub use scoring::{calculate_skill_overlap, SkillOverlap};
pub use skills::{is_catalog_skill, SKILL_CATALOG};
