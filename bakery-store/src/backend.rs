//! Storage backend abstraction for the document store.
//!
//! This module defines the traits that abstract over storage implementations, allowing the
//! document store to run against MongoDB in production and an in-memory map in tests.
//!
//! # Traits
//!
//! - [`StoreBackend`]: The core trait for storage backends
//! - [`DynStoreBackend`]: A trait for dynamic dispatch over backend implementations
//! - [`StoreBackendBuilder`]: Factory trait for creating backend instances
//!
//! # Examples
//!
//! ```ignore
//! use bakery_store::backend::StoreBackend;
//! use bson::doc;
//!
//! let backend = MyBackendImpl::new();
//! let id = backend.insert_document(doc! { "name": "Rye" }, "bakeryitem").await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use bson::Document;
use std::fmt::Debug;

use crate::{error::StoreResult, query::Query};

/// Abstract interface for document storage backends.
///
/// Implementations must be thread-safe and support concurrent access from multiple async
/// tasks; a single backend instance is shared by every in-flight request.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Inserts a new document into a collection.
    ///
    /// The backend generates a unique identifier, stores it under the reserved
    /// [`ID_KEY`](crate::document::ID_KEY) and returns it rendered as a string. The collection
    /// is created if it doesn't exist.
    async fn insert_document(&self, document: Document, collection: &str) -> StoreResult<String>;

    /// Queries documents in a collection.
    ///
    /// Every filter constraint is an exact-match equality; an empty filter selects all
    /// documents. Returned documents still carry their identifier under `_id`. A collection
    /// that doesn't exist yields an empty result.
    async fn query_documents(&self, query: Query, collection: &str) -> StoreResult<Vec<Document>>;

    /// Lists the names of all collections in the store.
    async fn list_collections(&self) -> StoreResult<Vec<String>>;

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// The default implementation is a no-op; backends holding connections override it.
    async fn shutdown(self) -> StoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[async_trait]
impl<B> StoreBackend for &B
where
    B: StoreBackend,
{
    async fn insert_document(&self, document: Document, collection: &str) -> StoreResult<String> {
        StoreBackend::insert_document(*self, document, collection).await
    }

    async fn query_documents(&self, query: Query, collection: &str) -> StoreResult<Vec<Document>> {
        StoreBackend::query_documents(*self, query, collection).await
    }

    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        StoreBackend::list_collections(*self).await
    }
}

/// Object-safe counterpart of [`StoreBackend`], implemented for every backend.
#[async_trait]
pub trait DynStoreBackend: Send + Sync + Debug {
    async fn insert_document(&self, document: Document, collection: &str) -> StoreResult<String>;
    async fn query_documents(&self, query: Query, collection: &str) -> StoreResult<Vec<Document>>;
    async fn list_collections(&self) -> StoreResult<Vec<String>>;
    async fn shutdown_boxed(self: Box<Self>) -> StoreResult<()>;
}

#[async_trait]
impl<B: StoreBackend + 'static> DynStoreBackend for B {
    async fn insert_document(&self, document: Document, collection: &str) -> StoreResult<String> {
        StoreBackend::insert_document(self, document, collection).await
    }

    async fn query_documents(&self, query: Query, collection: &str) -> StoreResult<Vec<Document>> {
        StoreBackend::query_documents(self, query, collection).await
    }

    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        StoreBackend::list_collections(self).await
    }

    async fn shutdown_boxed(self: Box<Self>) -> StoreResult<()> {
        StoreBackend::shutdown(*self).await
    }
}

#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> StoreResult<Self::Backend>;
}
