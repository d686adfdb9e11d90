//! Equality filters over top-level document fields.

use serde_json::Value;

use crate::Document;

/// A conjunction of `field == value` predicates.
///
/// An empty filter matches every document. A `null` predicate matches a
/// document whose field is null or absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    predicates: Vec<(String, Value)>,
}

impl Filter {
    /// Matches every document.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and(field, value)
    }

    /// Shorthand for `Filter::eq("_id", id)`.
    pub fn by_id(id: impl Into<Value>) -> Self {
        Self::eq("_id", id)
    }

    #[must_use]
    pub fn and(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.predicates.push((field.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn predicates(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.predicates.iter().map(|(f, v)| (f.as_str(), v))
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.predicates()
            .all(|(field, expected)| match doc.get(field) {
                Some(actual) => actual == expected,
                None => expected.is_null(),
            })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use {super::*, serde_json::json};

    fn doc(v: Value) -> Document {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(Filter::all().is_empty());
        assert!(Filter::all().matches(&Document::new()));
    }

    #[test]
    fn predicates_are_conjunctive() {
        let comment = doc(json!({ "_id": "c1", "post": "p1", "author": "a1" }));
        assert!(Filter::eq("post", "p1").and("author", "a1").matches(&comment));
        assert!(!Filter::eq("post", "p1").and("author", "a2").matches(&comment));
    }

    #[test]
    fn null_matches_missing_and_null_fields() {
        let filter = Filter::eq("title", Value::Null);
        assert!(filter.matches(&doc(json!({ "_id": "p1" }))));
        assert!(filter.matches(&doc(json!({ "_id": "p1", "title": null }))));
        assert!(!filter.matches(&doc(json!({ "_id": "p1", "title": "Hi" }))));
    }

    #[test]
    fn comparison_is_type_sensitive() {
        let filter = Filter::by_id("1");
        assert!(!filter.matches(&doc(json!({ "_id": 1 }))));
        assert!(filter.matches(&doc(json!({ "_id": "1" }))));
    }
}
