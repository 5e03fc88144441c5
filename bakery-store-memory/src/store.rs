//! In-memory storage implementation for document stores.
//!
//! Documents are kept per collection in insertion order behind an async-safe read-write lock.

use async_trait::async_trait;
use bson::{Document, oid::ObjectId};
use mea::rwlock::RwLock;
use std::{collections::HashMap, sync::Arc};

use bakery_store::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::ID_KEY,
    error::StoreResult,
    query::Query,
};

use crate::evaluator::DocumentEvaluator;

type StoreMap = HashMap<String, Vec<Document>>;

/// Thread-safe in-memory document storage backend.
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, so clones share the
/// same data. Identifiers are generated as `ObjectId`s, matching what MongoDB would assign.
///
/// Queries scan every document of a collection.
///
/// # Example
///
/// ```ignore
/// use bakery_store_memory::InMemoryStore;
/// use bakery_store::{backend::StoreBackend, query::Query};
/// use bson::doc;
///
/// let store = InMemoryStore::new();
/// let id = store.insert_document(doc! { "name": "Rye" }, "bakeryitem").await?;
/// let docs = store.query_documents(Query::new(), "bakeryitem").await?;
/// assert_eq!(docs.len(), 1);
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// collection_name -> documents in insertion order
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder
    }

    /// Returns the number of documents held in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        self.store
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn insert_document(&self, mut document: Document, collection: &str) -> StoreResult<String> {
        let id = ObjectId::new();
        document.insert(ID_KEY, id);

        self.store
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(id.to_hex())
    }

    async fn query_documents(&self, query: Query, collection: &str) -> StoreResult<Vec<Document>> {
        let store = self.store.read().await;
        let documents = match store.get(collection) {
            Some(documents) => documents,
            None => return Ok(vec![]),
        };

        Ok(DocumentEvaluator::filter_documents(
            documents,
            &query.filter,
            query.limit,
        ))
    }

    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        let mut names = self
            .store
            .read()
            .await
            .keys()
            .cloned()
            .collect::<Vec<_>>();
        names.sort();

        Ok(names)
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    async fn build(self) -> StoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bakery_store::query::Filter;
    use bson::{Bson, doc};

    #[tokio::test]
    async fn insert_assigns_object_id_under_reserved_key() {
        let store = InMemoryStore::new();

        let id = store
            .insert_document(doc! { "name": "Rye" }, "bakeryitem")
            .await
            .unwrap();
        let docs = store.query_documents(Query::new(), "bakeryitem").await.unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].get(ID_KEY), Some(&Bson::ObjectId(ObjectId::parse_str(&id).unwrap())));
        assert_eq!(docs[0].get_str("name").unwrap(), "Rye");
    }

    #[tokio::test]
    async fn generated_ids_are_unique() {
        let store = InMemoryStore::new();

        let first = store.insert_document(doc! {}, "order").await.unwrap();
        let second = store.insert_document(doc! {}, "order").await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn missing_collection_yields_no_documents() {
        let store = InMemoryStore::new();

        assert!(store.query_documents(Query::new(), "nothing").await.unwrap().is_empty());
        assert_eq!(store.count("nothing").await, 0);
    }

    #[tokio::test]
    async fn query_filters_limits_and_keeps_insertion_order() {
        let store = InMemoryStore::new();
        for (name, category) in [("Rye", "Bread"), ("Eclair", "Pastry"), ("Baguette", "Bread")] {
            store
                .insert_document(doc! { "name": name, "category": category }, "bakeryitem")
                .await
                .unwrap();
        }

        let breads = store
            .query_documents(
                Query::builder().filter(Filter::eq("category", "Bread")).build(),
                "bakeryitem",
            )
            .await
            .unwrap();
        let first = store
            .query_documents(Query::builder().limit(1).build(), "bakeryitem")
            .await
            .unwrap();

        assert_eq!(
            breads.iter().map(|d| d.get_str("name").unwrap()).collect::<Vec<_>>(),
            vec!["Rye", "Baguette"]
        );
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].get_str("name").unwrap(), "Rye");
    }

    #[tokio::test]
    async fn clones_share_data_and_list_collections() {
        let store = InMemoryStore::builder().build().await.unwrap();
        let clone = store.clone();

        clone.insert_document(doc! {}, "order").await.unwrap();
        clone.insert_document(doc! {}, "bakeryitem").await.unwrap();

        assert_eq!(store.count("order").await, 1);
        assert_eq!(
            store.list_collections().await.unwrap(),
            vec!["bakeryitem".to_string(), "order".to_string()]
        );
    }
}
