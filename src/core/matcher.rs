use thiserror::Error;

use crate::core::scoring::calculate_skill_overlap;
use crate::models::{MatchResult, User};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("Requester is missing; matches cannot be computed without one")]
    MissingRequester,
}

/// Score every candidate against the requester and rank them
///
/// The output has exactly one entry per candidate, including candidates with
/// no overlap at all. Narrowing the pool (and removing the requester from it)
/// is the caller's job. Ordering is descending by score; candidates with equal
/// scores keep their incoming relative order.
pub fn compute_matches(
    requester: Option<&User>,
    candidates: Vec<User>,
) -> Result<Vec<MatchResult>, MatchError> {
    let requester = requester.ok_or(MatchError::MissingRequester)?;

    let mut results: Vec<MatchResult> = candidates
        .into_iter()
        .map(|candidate| {
            let overlap = calculate_skill_overlap(requester, &candidate);
            MatchResult {
                match_score: overlap.score(),
                match_type: overlap.match_type(),
                can_teach_me: overlap.can_teach_me,
                can_learn_from_me: overlap.can_learn_from_me,
                candidate,
            }
        })
        .collect();

    // sort_by is stable
    results.sort_by(|a, b| b.match_score.cmp(&a.match_score));

    Ok(results)
}
