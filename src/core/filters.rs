use crate::models::{DiscoverQuery, Filter, User};

/// Candidate pre-filter for match discovery
///
/// Keeps users other than the requester that either have a skill the
/// requester wants or want a skill the requester has. This only bounds the
/// pool; the matcher scores whatever it is given.
pub fn skill_overlap_filter(requester: &User) -> Filter {
    Filter::And(vec![
        Filter::ne("id", requester.id.as_str()),
        Filter::Or(vec![
            Filter::contains_any("skills", &requester.wanted_skills),
            Filter::contains_any("wantedSkills", &requester.skills),
        ]),
    ])
}

/// Filter for browsing users other than `user_id`
///
/// `skill` restricts to users who can teach it; `location` is a
/// case-insensitive substring match. Blank values are ignored.
pub fn discover_filter(user_id: &str, query: &DiscoverQuery) -> Filter {
    let mut filters = vec![Filter::ne("id", user_id)];

    if let Some(skill) = query.skill.as_deref().filter(|s| !s.trim().is_empty()) {
        filters.push(Filter::contains_any("skills", &[skill.to_string()]));
    }

    if let Some(location) = query.location.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        filters.push(Filter::icontains("location", location));
    }

    Filter::And(filters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Document;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    fn requester() -> User {
        User::with_skills("me", vec!["Running".into()], vec!["Yoga".into(), "Boxing".into()])
    }

    #[test]
    fn test_overlap_filter_excludes_self() {
        let filter = skill_overlap_filter(&requester());
        let me = doc(json!({ "id": "me", "skills": ["Yoga"], "wantedSkills": ["Running"] }));
        assert!(!filter.matches(&me));
    }

    #[test]
    fn test_overlap_filter_either_direction() {
        let filter = skill_overlap_filter(&requester());

        let teacher = doc(json!({ "id": "a", "skills": ["Boxing"], "wantedSkills": [] }));
        let student = doc(json!({ "id": "b", "skills": [], "wantedSkills": ["Running"] }));
        let stranger = doc(json!({ "id": "c", "skills": ["Swimming"], "wantedSkills": ["Pilates"] }));
        let bare = doc(json!({ "id": "d" }));

        assert!(filter.matches(&teacher));
        assert!(filter.matches(&student));
        assert!(!filter.matches(&stranger));
        assert!(!filter.matches(&bare));
    }

    #[test]
    fn test_overlap_filter_empty_requester_matches_nobody() {
        let filter = skill_overlap_filter(&User::with_skills("me", vec![], vec![]));
        let other = doc(json!({ "id": "a", "skills": ["Yoga"], "wantedSkills": ["Running"] }));
        assert!(!filter.matches(&other));
    }

    #[test]
    fn test_discover_filter() {
        let query = DiscoverQuery {
            skill: Some("Yoga".to_string()),
            location: Some("rapids".to_string()),
        };
        let filter = discover_filter("me", &query);

        let hit = doc(json!({ "id": "a", "skills": ["Yoga"], "location": "Grand Rapids" }));
        let wrong_skill = doc(json!({ "id": "b", "skills": ["Boxing"], "location": "Grand Rapids" }));
        let wrong_place = doc(json!({ "id": "c", "skills": ["Yoga"], "location": "Lansing" }));

        assert!(filter.matches(&hit));
        assert!(!filter.matches(&wrong_skill));
        assert!(!filter.matches(&wrong_place));
    }

    #[test]
    fn test_discover_filter_blank_params() {
        let query = DiscoverQuery {
            skill: Some(String::new()),
            location: Some("  ".to_string()),
        };
        assert_eq!(discover_filter("me", &query), Filter::And(vec![Filter::ne("id", "me")]));
    }
}
