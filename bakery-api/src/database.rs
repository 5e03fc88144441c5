//! The application's handle on the document store.
//!
//! [`Database`] is built once at startup and never fails to construct: a missing configuration
//! or a connection string the driver rejects leaves it in a degraded state, every write then
//! fails with [`StoreError::Unavailable`] and diagnostics report why.

use bakery_store::{
    document::{Document, DocumentExt},
    error::{StoreError, StoreResult},
    query::Filter,
    store::{DynDocumentStore, IntoDynDocumentStore},
};
use bson::Document as BsonDocument;
use chrono::Utc;

use crate::config::Config;

pub const CREATED_AT_KEY: &str = "created_at";
pub const UPDATED_AT_KEY: &str = "updated_at";

#[derive(Debug)]
enum Connection {
    Unconfigured,
    Failed(String),
    Ready(DynDocumentStore),
}

/// Outcome of a connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseStatus {
    /// `DATABASE_URL` or `DATABASE_NAME` is not set.
    Unconfigured,
    /// A client could not be created.
    Unavailable(String),
    /// A client exists but the server rejected or did not answer the probe.
    Failing(String),
    /// The probe succeeded; carries the collection names.
    Connected(Vec<String>),
}

#[derive(Debug)]
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens the configured MongoDB database.
    pub async fn connect(config: &Config) -> Self {
        match (&config.database_url, &config.database_name) {
            (Some(url), Some(name)) => Self::open(url, name).await,
            _ => {
                tracing::warn!("DATABASE_URL or DATABASE_NAME not set, running without a database");
                Self::unconfigured()
            }
        }
    }

    #[cfg(feature = "mongodb")]
    async fn open(url: &str, name: &str) -> Self {
        use bakery_store::{backend::StoreBackendBuilder, store::DocumentStore};
        use bakery_store_mongodb::MongoDbStore;

        match MongoDbStore::builder(url, name).build().await {
            Ok(store) => {
                tracing::info!(database = name, "MongoDB client created");
                Self::from_store(DocumentStore::new(store))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create MongoDB client");
                Self::failed(e.to_string())
            }
        }
    }

    #[cfg(not(feature = "mongodb"))]
    async fn open(_url: &str, _name: &str) -> Self {
        Self::failed("built without MongoDB support")
    }

    pub fn from_store(store: impl IntoDynDocumentStore) -> Self {
        Self {
            connection: Connection::Ready(store.into_dyn()),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            connection: Connection::Unconfigured,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            connection: Connection::Failed(reason.into()),
        }
    }

    fn store(&self) -> StoreResult<&DynDocumentStore> {
        match &self.connection {
            Connection::Ready(store) => Ok(store),
            Connection::Unconfigured => Err(StoreError::Unavailable(
                "DATABASE_URL and DATABASE_NAME must be set".to_string(),
            )),
            Connection::Failed(reason) => Err(StoreError::Unavailable(reason.clone())),
        }
    }

    /// Stamps `created_at` and `updated_at` on `document` and inserts it into `collection`.
    ///
    /// Returns the identifier generated by the store.
    pub async fn create_document(
        &self,
        collection: &str,
        mut document: BsonDocument,
    ) -> StoreResult<String> {
        let store = self.store()?;
        let now = bson::DateTime::from_chrono(Utc::now());
        document.insert(CREATED_AT_KEY, now);
        document.insert(UPDATED_AT_KEY, now);

        store.create_document(collection, document).await
    }

    pub async fn insert<D: Document>(&self, document: &D) -> StoreResult<String> {
        self.create_document(D::collection_name(), document.to_bson_document()?)
            .await
    }

    pub async fn get_documents(
        &self,
        collection: &str,
        filter: Filter,
        limit: Option<usize>,
    ) -> StoreResult<Vec<BsonDocument>> {
        self.store()?.get_documents(collection, filter, limit).await
    }

    pub async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        self.store()?.list_collections().await
    }

    /// Checks connectivity by listing collections. Never fails; errors become the status.
    pub async fn probe(&self) -> DatabaseStatus {
        match &self.connection {
            Connection::Unconfigured => DatabaseStatus::Unconfigured,
            Connection::Failed(reason) => DatabaseStatus::Unavailable(reason.clone()),
            Connection::Ready(_) => match self.list_collection_names().await {
                Ok(names) => DatabaseStatus::Connected(names),
                Err(e) => DatabaseStatus::Failing(e.to_string()),
            },
        }
    }

    pub async fn shutdown(self) -> StoreResult<()> {
        match self.connection {
            Connection::Ready(store) => store.shutdown().await,
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bakery_store::{document::ID_KEY, store::DocumentStore};
    use bakery_store_memory::InMemoryStore;
    use bson::doc;

    fn memory_database() -> Database {
        Database::from_store(DocumentStore::new(InMemoryStore::new()))
    }

    #[tokio::test]
    async fn create_document_stamps_equal_timestamps() {
        let db = memory_database();

        let id = db
            .create_document("order", doc! { "customer_name": "Ada" })
            .await
            .unwrap();
        let stored = db.get_documents("order", Filter::all(), None).await.unwrap();

        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].get_object_id(ID_KEY).unwrap().to_hex(), id);
        assert_eq!(
            stored[0].get_datetime(CREATED_AT_KEY).unwrap(),
            stored[0].get_datetime(UPDATED_AT_KEY).unwrap()
        );
    }

    #[tokio::test]
    async fn unconfigured_database_rejects_operations() {
        let db = Database::unconfigured();

        let err = db
            .create_document("order", doc! { "customer_name": "Ada" })
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(db.get_documents("order", Filter::all(), None).await.is_err());
    }

    #[tokio::test]
    async fn connect_without_configuration_is_unconfigured() {
        let db = Database::connect(&Config::default()).await;

        assert_eq!(db.probe().await, DatabaseStatus::Unconfigured);
    }

    #[cfg(feature = "mongodb")]
    #[tokio::test]
    async fn connect_with_rejected_url_is_unavailable() {
        let config = Config {
            database_url: Some("not-a-mongodb-url".to_string()),
            database_name: Some("bakery".to_string()),
            ..Config::default()
        };

        let db = Database::connect(&config).await;

        assert!(matches!(db.probe().await, DatabaseStatus::Unavailable(_)));
        assert!(matches!(
            db.list_collection_names().await,
            Err(StoreError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn probe_lists_collections_when_connected() {
        let db = memory_database();
        db.create_document("bakeryitem", doc! { "name": "Rye" })
            .await
            .unwrap();

        assert_eq!(
            db.probe().await,
            DatabaseStatus::Connected(vec!["bakeryitem".to_string()])
        );
    }

    #[tokio::test]
    async fn shutdown_is_a_no_op_without_a_store() {
        Database::unconfigured().shutdown().await.unwrap();
        memory_database().shutdown().await.unwrap();
    }
}
