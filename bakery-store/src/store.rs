//! Main document store interface for interacting with document backends.
//!
//! - [`DocumentStore`] - Typed store for working with a specific backend implementation
//! - [`DynDocumentStore`] - Dynamic dispatch store for runtime backend selection
//!
//! # Example
//!
//! ```ignore
//! use bakery_store::{query::Filter, store::DocumentStore};
//!
//! let store = DocumentStore::new(backend);
//! let id = store.create_document("order", doc! { "customer_name": "Ada" }).await?;
//! let orders = store.get_documents("order", Filter::all(), None).await?;
//! ```

use bson::Document as BsonDocument;

use crate::{
    backend::{DynStoreBackend, StoreBackend},
    error::StoreResult,
    query::{Filter, Query},
};

/// A strongly-typed document store bound to a specific backend implementation.
#[derive(Debug)]
pub struct DocumentStore<B: StoreBackend> {
    backend: B,
}

impl<B: StoreBackend> DocumentStore<B> {
    /// Creates a new document store with the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Inserts a document into `collection` and returns its generated identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write or is unreachable.
    pub async fn create_document(
        &self,
        collection: &str,
        document: BsonDocument,
    ) -> StoreResult<String> {
        StoreBackend::insert_document(&self.backend, document, collection).await
    }

    /// Fetches documents from `collection` matching every equality constraint in `filter`.
    ///
    /// Each returned document still contains its identifier under `_id`.
    pub async fn get_documents(
        &self,
        collection: &str,
        filter: Filter,
        limit: Option<usize>,
    ) -> StoreResult<Vec<BsonDocument>> {
        StoreBackend::query_documents(
            &self.backend,
            Query::builder().filter(filter).maybe_limit(limit).build(),
            collection,
        )
        .await
    }

    /// Lists all collections in the store.
    pub async fn list_collections(&self) -> StoreResult<Vec<String>> {
        StoreBackend::list_collections(&self.backend).await
    }

    /// Shuts down the store and releases backend resources.
    pub async fn shutdown(self) -> StoreResult<()> {
        StoreBackend::shutdown(self.backend).await
    }
}

/// A document store over a boxed backend, for when the backend is chosen at runtime.
#[derive(Debug)]
pub struct DynDocumentStore {
    backend: Box<dyn DynStoreBackend>,
}

impl DynDocumentStore {
    /// Creates a new dynamic document store with the given backend trait object.
    pub fn new(backend: Box<dyn DynStoreBackend>) -> Self {
        Self { backend }
    }

    /// Inserts a document into `collection` and returns its generated identifier.
    pub async fn create_document(
        &self,
        collection: &str,
        document: BsonDocument,
    ) -> StoreResult<String> {
        self.backend.insert_document(document, collection).await
    }

    /// Fetches documents from `collection` matching every equality constraint in `filter`.
    pub async fn get_documents(
        &self,
        collection: &str,
        filter: Filter,
        limit: Option<usize>,
    ) -> StoreResult<Vec<BsonDocument>> {
        self.backend
            .query_documents(
                Query::builder().filter(filter).maybe_limit(limit).build(),
                collection,
            )
            .await
    }

    /// Lists all collections in the store.
    pub async fn list_collections(&self) -> StoreResult<Vec<String>> {
        self.backend.list_collections().await
    }

    /// Shuts down the store and releases backend resources.
    pub async fn shutdown(self) -> StoreResult<()> {
        self.backend.shutdown_boxed().await
    }
}

/// Conversion trait for converting a document store into a dynamic owned store.
pub trait IntoDynDocumentStore {
    fn into_dyn(self) -> DynDocumentStore;
}

impl<B: StoreBackend + 'static> IntoDynDocumentStore for DocumentStore<B> {
    fn into_dyn(self) -> DynDocumentStore {
        DynDocumentStore::new(Box::new(self.backend))
    }
}

impl IntoDynDocumentStore for DynDocumentStore {
    fn into_dyn(self) -> DynDocumentStore {
        self
    }
}
