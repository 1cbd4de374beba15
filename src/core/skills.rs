/// Skills offered by the registration, profile and discovery forms
///
/// Users may still declare labels outside this table; matching compares
/// whatever strings are stored.
pub const SKILL_CATALOG: &[&str] = &[
    "Weightlifting",
    "Cardio",
    "Yoga",
    "Boxing",
    "Running",
    "Swimming",
    "Cycling",
    "CrossFit",
    "Pilates",
    "Rock Climbing",
];

pub fn is_catalog_skill(skill: &str) -> bool {
    SKILL_CATALOG.contains(&skill)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        assert!(is_catalog_skill("Rock Climbing"));
        assert!(!is_catalog_skill("rock climbing"));
        assert_eq!(SKILL_CATALOG.len(), 10);
    }
}
