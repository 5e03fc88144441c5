//! In-memory document storage backend for the bakery document store.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! It backs the API test suites.
//!
//! # Quick Start
//!
//! ```ignore
//! use bakery_store::{backend::StoreBackendBuilder, query::Filter, store::DocumentStore};
//! use bakery_store_memory::InMemoryStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = DocumentStore::new(InMemoryStore::builder().build().await.unwrap());
//!     let id = store
//!         .create_document("bakeryitem", bson::doc! { "name": "Rye" })
//!         .await
//!         .unwrap();
//!
//!     let items = store.get_documents("bakeryitem", Filter::all(), None).await.unwrap();
//!     assert_eq!(items.len(), 1);
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as bakery_store_memory;

pub mod evaluator;
pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
