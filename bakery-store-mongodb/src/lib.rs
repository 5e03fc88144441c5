//! MongoDB backend implementation for the bakery document store.
//!
//! This crate provides a MongoDB-based implementation of the `StoreBackend` trait. The
//! driver owns the connection pool; one `MongoDbStore` is shared by every request.
//!
//! # Example
//!
//! ```ignore
//! use bakery_store::backend::StoreBackendBuilder;
//! use bakery_store_mongodb::MongoDbStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MongoDbStore::builder("mongodb://localhost:27017", "bakery")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as bakery_store_mongodb;

pub mod query;
pub mod sanitizer;
pub mod store;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
