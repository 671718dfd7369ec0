pub mod connection;
pub mod models;
pub mod rest;
pub mod sql;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::{Config, DataSource};
use crate::db::rest::RestStore;
use crate::db::sql::SqlStore;
use crate::db::store::{Store, StoreError};

/// Build the store the configuration selects: direct SQL in production,
/// the hosted REST API everywhere else.
pub async fn open_store(config: &Config) -> Result<Arc<dyn Store>, StoreError> {
    match &config.data_source {
        DataSource::Sql { database_url } => {
            info!("Connecting to PostgreSQL directly ({} environment)", config.environment);
            let pool = connection::get_connection(database_url, config.max_db_connections)
                .await
                .map_err(StoreError::Sql)?;
            info!("Database connection pool established");
            Ok(Arc::new(SqlStore::new(pool)))
        }
        DataSource::Rest { url, key } => {
            info!("Using hosted REST data API at {} ({} environment)", url, config.environment);
            let store = RestStore::new(url, key, Duration::from_secs(config.request_timeout_secs))?;
            Ok(Arc::new(store))
        }
    }
}
