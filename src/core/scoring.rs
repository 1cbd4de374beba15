use std::collections::HashSet;

use crate::models::{MatchType, User};

/// Bidirectional skill overlap between a requester and one candidate
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SkillOverlap {
    /// Candidate skills the requester wants to learn
    pub can_teach_me: Vec<String>,
    /// Candidate wanted skills the requester can teach
    pub can_learn_from_me: Vec<String>,
}

impl SkillOverlap {
    /// Number of overlapping skills in both directions
    #[inline]
    pub fn score(&self) -> u32 {
        (self.can_teach_me.len() + self.can_learn_from_me.len()) as u32
    }

    pub fn match_type(&self) -> MatchType {
        match (self.can_teach_me.is_empty(), self.can_learn_from_me.is_empty()) {
            (false, false) => MatchType::Mutual,
            (false, true) => MatchType::Teacher,
            (true, false) => MatchType::Student,
            (true, true) => MatchType::Unmatched,
        }
    }
}

/// Compute the skill overlap of `candidate` against `requester`
///
/// Membership is an exact, case-sensitive string comparison. The candidate's
/// list order is preserved and repeated entries are counted once.
pub fn calculate_skill_overlap(requester: &User, candidate: &User) -> SkillOverlap {
    SkillOverlap {
        can_teach_me: intersect(&candidate.skills, &requester.wanted_skills),
        can_learn_from_me: intersect(&candidate.wanted_skills, &requester.skills),
    }
}

/// Elements of `items` that appear in `allowed`, in `items` order, without repeats
fn intersect(items: &[String], allowed: &[String]) -> Vec<String> {
    let allowed: HashSet<&str> = allowed.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();

    items
        .iter()
        .filter(|item| allowed.contains(item.as_str()) && seen.insert(item.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(skills: &[&str], wanted: &[&str]) -> User {
        User::with_skills(
            "u",
            skills.iter().map(|s| s.to_string()).collect(),
            wanted.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_mutual_overlap() {
        let requester = user(&["Running"], &["Yoga", "Boxing"]);
        let candidate = user(&["Yoga"], &["Running"]);

        let overlap = calculate_skill_overlap(&requester, &candidate);
        assert_eq!(overlap.can_teach_me, vec!["Yoga"]);
        assert_eq!(overlap.can_learn_from_me, vec!["Running"]);
        assert_eq!(overlap.score(), 2);
        assert_eq!(overlap.match_type(), MatchType::Mutual);
    }

    #[test]
    fn test_teacher_and_student_overlap() {
        let requester = user(&["Running"], &["Yoga", "Boxing"]);

        let teacher = calculate_skill_overlap(&requester, &user(&["Boxing"], &["Cycling"]));
        assert_eq!(teacher.match_type(), MatchType::Teacher);
        assert_eq!(teacher.score(), 1);

        let student = calculate_skill_overlap(&requester, &user(&["Pilates"], &["Running"]));
        assert_eq!(student.match_type(), MatchType::Student);
        assert_eq!(student.score(), 1);
    }

    #[test]
    fn test_no_overlap() {
        let requester = user(&["Running"], &["Yoga", "Boxing"]);
        let overlap = calculate_skill_overlap(&requester, &user(&["Swimming"], &["Pilates"]));

        assert_eq!(overlap.score(), 0);
        assert_eq!(overlap.match_type(), MatchType::Unmatched);
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let requester = user(&[], &["Yoga"]);
        let overlap = calculate_skill_overlap(&requester, &user(&["yoga", "YOGA"], &[]));
        assert!(overlap.can_teach_me.is_empty());
    }

    #[test]
    fn test_repeated_candidate_skills_count_once() {
        let requester = user(&[], &["Yoga", "Boxing"]);
        let overlap = calculate_skill_overlap(&requester, &user(&["Boxing", "Yoga", "Boxing"], &[]));

        assert_eq!(overlap.can_teach_me, vec!["Boxing", "Yoga"]);
        assert_eq!(overlap.score(), 2);
    }
}
