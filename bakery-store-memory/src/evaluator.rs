//! Filter evaluation for in-memory document lookups.
//!
//! Equality is evaluated on a normalized view of BSON values so that a filter written with
//! an integer matches a stored double of the same value, the way a document database would.

use bson::{Bson, DateTime, Document, oid::ObjectId};
use std::collections::HashMap;

use bakery_store::query::Filter;

/// Comparable representation of BSON values.
///
/// All numeric types are normalized to `f64`.
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    Null,
    Bool(bool),
    Number(f64),
    DateTime(DateTime),
    String(&'a str),
    ObjectId(ObjectId),
    Array(Vec<Comparable<'a>>),
    Map(HashMap<&'a str, Comparable<'a>>),
    /// Values with no meaningful equality here (binary, regex, code, ...).
    Opaque,
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Number(*value as f64),
            Bson::Int64(value) => Comparable::Number(*value as f64),
            Bson::Double(value) => Comparable::Number(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::String(value) => Comparable::String(value),
            Bson::ObjectId(value) => Comparable::ObjectId(*value),
            Bson::Array(arr) => Comparable::Array(arr.iter().map(Comparable::from).collect()),
            Bson::Document(doc) => Comparable::Map(
                doc.iter()
                    .map(|(k, v)| (k.as_str(), Comparable::from(v)))
                    .collect(),
            ),
            _ => Comparable::Opaque,
        }
    }
}

impl<'a> PartialEq for Comparable<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(a), Comparable::Bool(b)) => a == b,
            (Comparable::Number(a), Comparable::Number(b)) => a == b,
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::ObjectId(a), Comparable::ObjectId(b)) => a == b,
            (Comparable::Array(a), Comparable::Array(b)) => a == b,
            (Comparable::Map(a), Comparable::Map(b)) => a == b,
            _ => false,
        }
    }
}

pub(crate) struct DocumentEvaluator<'a> {
    document: &'a Document,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    /// Returns `true` when every constraint of `filter` matches. A missing field never
    /// matches.
    pub fn matches(&self, filter: &Filter) -> bool {
        filter.iter().all(|(field, expected)| {
            self.document
                .get(field)
                .is_some_and(|actual| Comparable::from(actual) == Comparable::from(expected))
        })
    }

    pub fn filter_documents(
        documents: impl IntoIterator<Item = &'a Document>,
        filter: &Filter,
        limit: Option<usize>,
    ) -> Vec<Document> {
        documents
            .into_iter()
            .filter(|doc| DocumentEvaluator::new(doc).matches(filter))
            .take(limit.filter(|limit| *limit > 0).unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn empty_filter_matches_everything() {
        let doc = doc! { "name": "Rye" };

        assert!(DocumentEvaluator::new(&doc).matches(&Filter::all()));
    }

    #[test]
    fn numbers_compare_across_types() {
        let doc = doc! { "price": 6.0, "quantity": 2_i64 };

        assert!(DocumentEvaluator::new(&doc).matches(&Filter::eq("price", 6)));
        assert!(DocumentEvaluator::new(&doc).matches(&Filter::eq("quantity", 2.0)));
    }

    #[test]
    fn all_constraints_must_match() {
        let doc = doc! { "category": "Bread", "is_available": true };

        assert!(
            DocumentEvaluator::new(&doc)
                .matches(&Filter::eq("category", "Bread").and_eq("is_available", true))
        );
        assert!(
            !DocumentEvaluator::new(&doc)
                .matches(&Filter::eq("category", "Bread").and_eq("is_available", false))
        );
    }

    #[test]
    fn missing_field_does_not_match_null() {
        let doc = doc! { "name": "Rye" };

        assert!(!DocumentEvaluator::new(&doc).matches(&Filter::eq("notes", Bson::Null)));
    }

    #[test]
    fn nested_documents_compare_structurally() {
        let doc = doc! { "items": [{ "item_id": "a", "quantity": 1 }] };

        assert!(DocumentEvaluator::new(&doc).matches(&Filter::eq(
            "items",
            vec![Bson::Document(doc! { "item_id": "a", "quantity": 1.0 })]
        )));
    }

    #[test]
    fn filter_documents_honours_limit() {
        let docs = vec![
            doc! { "category": "Cake" },
            doc! { "category": "Bread" },
            doc! { "category": "Cake" },
        ];

        let cakes = DocumentEvaluator::filter_documents(&docs, &Filter::eq("category", "Cake"), None);
        let first = DocumentEvaluator::filter_documents(&docs, &Filter::all(), Some(1));

        assert_eq!(cakes.len(), 2);
        assert_eq!(first, vec![doc! { "category": "Cake" }]);
    }

    #[test]
    fn zero_limit_returns_every_match() {
        let docs = [doc! { "name": "Rye" }, doc! { "name": "Spelt" }];

        assert_eq!(
            DocumentEvaluator::filter_documents(docs.iter(), &Filter::all(), Some(0)).len(),
            2
        );
    }
}
