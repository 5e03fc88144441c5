//! A thin document store layer that gives the bakery backend one interface over MongoDB and
//! an in-memory store.
//!
//! - **Document traits** ([`document`]) - Typed documents and their BSON conversions
//! - **Store backend abstraction** ([`backend`]) - Traits for implementing storage backends
//! - **Query API** ([`query`]) - Exact-match filters and result limits
//! - **Document store** ([`store`]) - Main interface for creating and reading documents
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use bakery_store::{
//!     document::{Document, DocumentExt},
//!     query::Filter,
//!     store::DocumentStore,
//! };
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Loaf {
//!     pub name: String,
//! }
//!
//! impl Document for Loaf {
//!     fn collection_name() -> &'static str {
//!         "loaf"
//!     }
//! }
//!
//! let store = DocumentStore::new(backend);
//! let loaf = Loaf { name: "Rye".into() };
//! let id = store
//!     .create_document(Loaf::collection_name(), loaf.to_bson_document()?)
//!     .await?;
//! let loaves = store
//!     .get_documents(Loaf::collection_name(), Filter::eq("name", "Rye"), None)
//!     .await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as bakery_store;

pub mod backend;
pub mod document;
pub mod error;
pub mod query;
pub mod store;

pub use bson;
