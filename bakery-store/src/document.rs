//! Core traits for document representation and serialization.
//!
//! This module provides the trait that typed documents implement and utilities for converting
//! them to BSON documents, plus the rendering of stored identifiers.

use bson::{Bson, Document as BsonDocument, ser::serialize_to_bson};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{StoreError, StoreResult};

/// Reserved key under which a backend stores the generated identifier.
pub const ID_KEY: &str = "_id";

/// Core trait that typed documents stored in a document store implement.
///
/// Identifiers are generated by the store on insert, so a document type does not carry its
/// own id; it only declares which collection it belongs to.
///
/// # Example
///
/// ```ignore
/// use bakery_store::document::Document;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Loaf {
///     pub name: String,
/// }
///
/// impl Document for Loaf {
///     fn collection_name() -> &'static str {
///         "loaf"
///     }
/// }
/// ```
pub trait Document: Serialize + DeserializeOwned + Send + Sync + Clone + 'static {
    /// Returns the name of the collection this document belongs to.
    fn collection_name() -> &'static str;
}

/// Extension trait providing BSON conversions for documents.
///
/// Automatically implemented for all types that implement [`Document`].
pub trait DocumentExt: Document {
    /// Converts this document to a BSON mapping for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the value does not serialize to a mapping.
    fn to_bson_document(&self) -> StoreResult<BsonDocument>;
}

impl<D: Document> DocumentExt for D {
    fn to_bson_document(&self) -> StoreResult<BsonDocument> {
        match serialize_to_bson(self)? {
            Bson::Document(document) => Ok(document),
            other => Err(StoreError::InvalidDocument(format!(
                "expected a mapping for collection {}, got {:?}",
                D::collection_name(),
                other.element_type()
            ))),
        }
    }
}

/// Renders a stored identifier as the string handed back to callers.
///
/// Object ids become their hex form and string ids pass through.
pub fn id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}
