use async_trait::async_trait;
use bson::Document;
use futures::TryStreamExt;
use mongodb::{Client, Collection as MongoCollection, options::ClientOptions};

use bakery_store::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::id_to_string,
    error::{StoreError, StoreResult},
    query::Query,
};

use crate::{query::MongoQueryTranslator, sanitizer::KeySanitizer};

#[derive(Debug)]
pub struct MongoDbStore {
    client: Client,
    database: String,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    /// Name of the database this store reads and writes.
    pub fn database_name(&self) -> &str {
        &self.database
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(&KeySanitizer::sanitize_key(collection_name))
    }
}

#[async_trait]
impl StoreBackend for MongoDbStore {
    async fn insert_document(&self, document: Document, collection: &str) -> StoreResult<String> {
        let result = self
            .get_collection(collection)
            .insert_one(KeySanitizer::sanitize_document(document))
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(id_to_string(result.inserted_id))
    }

    async fn query_documents(&self, query: Query, collection: &str) -> StoreResult<Vec<Document>> {
        Ok(
            self.get_collection(collection)
                .find(MongoQueryTranslator::filter(&query.filter))
                .with_options(MongoQueryTranslator::options(&query))
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?
                .try_collect::<Vec<Document>>()
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?
                .into_iter()
                .map(KeySanitizer::restore_document)
                .collect()
        )
    }

    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        Ok(
            self.client
                .database(&self.database)
                .list_collection_names()
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?
                .into_iter()
                .map(|name| KeySanitizer::restore_key(&name))
                .collect()
        )
    }

    async fn shutdown(self) -> StoreResult<()> {
        self.client.shutdown().await;

        Ok(())
    }
}

pub struct MongoDbStoreBuilder {
    dsn: String,
    database: String,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
        }
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    /// Parses the connection string and creates a client.
    ///
    /// The driver connects lazily, so an unreachable server is not detected here; it surfaces
    /// as a backend error on the first operation.
    async fn build(self) -> StoreResult<Self::Backend> {
        let options = ClientOptions::parse(&self.dsn)
            .await
            .map_err(|e| StoreError::Initialization(e.to_string()))?;
        let client = Client::with_options(options)
            .map_err(|e| StoreError::Initialization(e.to_string()))?;

        Ok(MongoDbStore::new(client, self.database))
    }
}
