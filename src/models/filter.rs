use serde_json::{Map, Value};

/// A stored document: a JSON object carrying its own `id`
pub type Document = Map<String, Value>;

/// Predicate over document fields
///
/// Every backend evaluates the same match semantics; backends that cannot
/// push a predicate down to the server apply [`Filter::matches`] locally.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals the value
    Eq(String, Value),
    /// Field is absent or differs from the value
    Ne(String, Value),
    /// Array field shares at least one element with the values
    ContainsAny(String, Vec<String>),
    /// String field contains the needle, ignoring case
    IContains(String, String),
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Filter::Eq(field.to_string(), value.into())
    }

    pub fn ne(field: &str, value: impl Into<Value>) -> Self {
        Filter::Ne(field.to_string(), value.into())
    }

    pub fn contains_any(field: &str, values: &[String]) -> Self {
        Filter::ContainsAny(field.to_string(), values.to_vec())
    }

    pub fn icontains(field: &str, needle: &str) -> Self {
        Filter::IContains(field.to_string(), needle.to_string())
    }

    /// Evaluate the predicate against a document
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Filter::Eq(field, value) => doc.get(field) == Some(value),
            Filter::Ne(field, value) => doc.get(field) != Some(value),
            Filter::ContainsAny(field, values) => match doc.get(field) {
                Some(Value::Array(items)) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .any(|item| values.iter().any(|v| v == item)),
                _ => false,
            },
            Filter::IContains(field, needle) => match doc.get(field) {
                Some(Value::String(s)) => s.to_lowercase().contains(&needle.to_lowercase()),
                _ => false,
            },
            Filter::And(filters) => filters.iter().all(|f| f.matches(doc)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(doc)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_eq_and_ne() {
        let d = doc(json!({ "id": "1", "email": "a@b.c" }));

        assert!(Filter::eq("email", "a@b.c").matches(&d));
        assert!(!Filter::eq("email", "x@b.c").matches(&d));
        assert!(Filter::ne("id", "2").matches(&d));
        assert!(!Filter::ne("id", "1").matches(&d));
        // Absent fields are never equal
        assert!(Filter::ne("missing", "1").matches(&d));
    }

    #[test]
    fn test_contains_any() {
        let d = doc(json!({ "skills": ["Yoga", "Boxing"] }));

        assert!(Filter::contains_any("skills", &["Boxing".to_string()]).matches(&d));
        assert!(!Filter::contains_any("skills", &["Running".to_string()]).matches(&d));
        assert!(!Filter::contains_any("skills", &[]).matches(&d));
        assert!(!Filter::contains_any("wantedSkills", &["Yoga".to_string()]).matches(&d));
    }

    #[test]
    fn test_icontains() {
        let d = doc(json!({ "location": "Grand Rapids, MI" }));

        assert!(Filter::icontains("location", "rapids").matches(&d));
        assert!(!Filter::icontains("location", "detroit").matches(&d));
        // Needle is literal text, not a pattern
        assert!(!Filter::icontains("location", ".*").matches(&d));
    }

    #[test]
    fn test_and_or() {
        let d = doc(json!({ "a": 1, "b": 2 }));

        assert!(Filter::And(vec![Filter::eq("a", 1), Filter::eq("b", 2)]).matches(&d));
        assert!(!Filter::And(vec![Filter::eq("a", 1), Filter::eq("b", 3)]).matches(&d));
        assert!(Filter::Or(vec![Filter::eq("a", 9), Filter::eq("b", 2)]).matches(&d));
        assert!(!Filter::Or(vec![]).matches(&d));
        // An empty conjunction matches everything
        assert!(Filter::And(vec![]).matches(&d));
    }
}
