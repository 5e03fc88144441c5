use std::sync::Arc;

use bakery_store::error::StoreResult;

use crate::{config::Config, database::Database};

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<Database>,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Self {
        Self {
            config: Arc::new(config),
            db: Arc::new(db),
        }
    }

    /// Shuts down the store once no handler holds the state any more.
    pub async fn shutdown(self) -> StoreResult<()> {
        match Arc::try_unwrap(self.db) {
            Ok(db) => db.shutdown().await,
            Err(_) => {
                tracing::warn!("Database still in use at shutdown, leaving it to the driver");
                Ok(())
            }
        }
    }
}
