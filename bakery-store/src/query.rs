//! Query construction for document lookups.
//!
//! Queries are deliberately small: a set of exact-match equality constraints and an optional
//! limit. An empty filter matches every document in a collection.
//!
//! ```ignore
//! use bakery_store::query::{Filter, Query};
//!
//! let query = Query::builder()
//!     .filter(Filter::eq("category", "Bread"))
//!     .limit(1)
//!     .build();
//! ```

use bson::{Bson, Document};

/// An ordered set of `field == value` constraints.
///
/// A document matches when every constraint matches. Constraints on the same field replace
/// each other, so the last one wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    fields: Document,
}

impl Filter {
    /// Creates an empty filter that matches all documents.
    pub fn all() -> Self {
        Self::default()
    }

    /// Creates a filter with a single equality constraint.
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self::all().and_eq(field, value)
    }

    /// Adds an equality constraint to this filter.
    pub fn and_eq(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Returns `true` if the filter has no constraints.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the `(field, value)` constraints in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Bson)> {
        self.fields.iter()
    }

    /// Returns the constraints as a BSON document.
    pub fn as_document(&self) -> &Document {
        &self.fields
    }
}

impl From<Document> for Filter {
    fn from(fields: Document) -> Self {
        Self { fields }
    }
}

/// A structured query: an equality filter plus an optional result limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Equality constraints documents must satisfy.
    pub filter: Filter,
    /// Maximum number of documents to return. `Some(0)` means no limit.
    pub limit: Option<usize>,
}

impl Query {
    /// Creates a query matching every document, without a limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new query builder for fluent construction.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter for this query.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.query.filter = filter;
        self
    }

    /// Sets the maximum number of documents to return. A limit of zero clears it.
    pub fn limit(self, limit: usize) -> Self {
        self.maybe_limit(Some(limit))
    }

    /// Sets or clears the limit.
    pub fn maybe_limit(mut self, limit: Option<usize>) -> Self {
        self.query.limit = limit.filter(|limit| *limit > 0);
        self
    }

    pub fn build(self) -> Query {
        self.query
    }
}
