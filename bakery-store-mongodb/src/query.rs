//! Query translation from the store's filter type to MongoDB query syntax.

use bson::{Bson, Document, doc};
use mongodb::options::FindOptions;

use bakery_store::query::{Filter, Query};

use crate::sanitizer::KeySanitizer;

pub(crate) struct MongoQueryTranslator;

impl MongoQueryTranslator {
    /// Builds a MongoDB filter document with one `$eq` clause per constraint.
    ///
    /// `$eq` is spelled out so that document-valued constraints are compared as values rather
    /// than parsed as operator expressions.
    pub(crate) fn filter(filter: &Filter) -> Document {
        filter
            .iter()
            .map(|(field, value)| {
                (
                    KeySanitizer::sanitize_key(field),
                    Bson::Document(doc! { "$eq": value.clone() }),
                )
            })
            .collect()
    }

    pub(crate) fn options(query: &Query) -> FindOptions {
        let mut options = FindOptions::default();
        options.limit = query
            .limit
            .filter(|limit| *limit > 0)
            .and_then(|limit| i64::try_from(limit).ok());
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_translates_to_empty_document() {
        assert_eq!(MongoQueryTranslator::filter(&Filter::all()), doc! {});
    }

    #[test]
    fn constraints_become_eq_clauses_with_sanitized_keys() {
        let filter = Filter::eq("category", "Bread").and_eq("meta.source", "seed");

        assert_eq!(
            MongoQueryTranslator::filter(&filter),
            doc! {
                "category": { "$eq": "Bread" },
                "meta%2Esource": { "$eq": "seed" },
            }
        );
    }

    #[test]
    fn limit_maps_to_find_options() {
        let query = Query::builder().limit(10).build();

        assert_eq!(MongoQueryTranslator::options(&query).limit, Some(10));
        assert_eq!(MongoQueryTranslator::options(&Query::new()).limit, None);
    }

    #[test]
    fn zero_limit_is_left_unset() {
        let query = Query {
            limit: Some(0),
            ..Query::new()
        };

        assert_eq!(MongoQueryTranslator::options(&query).limit, None);
    }
}
