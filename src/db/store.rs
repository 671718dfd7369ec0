use async_trait::async_trait;
use thiserror::Error;

use crate::api::application::{ApplicationChanges, NewApplication};
use crate::api::job::{JobChanges, NewJob};
use crate::api::user::{NewUser, UserChanges};
use crate::db::models::{ApplicationRow, JobListing, JobRow, UserRow};

/// Errors raised by a data-access backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database refused the request (constraint violation, bad filter, ...).
    /// The message is safe to hand back to the client.
    #[error("{0}")]
    Rejected(String),

    /// Network failure talking to the REST backend
    #[error("REST backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// Connection, pool or decoding failure on the SQL backend
    #[error("SQL backend failure: {0}")]
    Sql(sqlx::Error),

    /// A write that should echo the affected row came back empty
    #[error("backend returned no row for {0}")]
    MissingRow(&'static str),

    #[error("invalid backend credentials: {0}")]
    Credentials(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => StoreError::Rejected(db_err.message().to_string()),
            other => StoreError::Sql(other),
        }
    }
}

/// Data access for the three job-board resources.
///
/// One implementation is selected at startup from the environment; handlers
/// only ever see `dyn Store`.
#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name used in logs and readiness output
    fn backend(&self) -> &'static str;

    /// Cheap round-trip proving the backend is reachable
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release held connections
    async fn close(&self);

    async fn list_users(&self) -> Result<Vec<UserRow>, StoreError>;
    async fn find_user(&self, id: i64) -> Result<Option<UserRow>, StoreError>;
    async fn create_user(&self, user: &NewUser) -> Result<UserRow, StoreError>;
    async fn update_user(&self, id: i64, changes: &UserChanges) -> Result<Option<UserRow>, StoreError>;
    async fn delete_user(&self, id: i64) -> Result<(), StoreError>;

    async fn list_jobs(&self) -> Result<Vec<JobListing>, StoreError>;
    async fn find_job(&self, id: i64) -> Result<Option<JobListing>, StoreError>;
    async fn create_job(&self, job: &NewJob) -> Result<JobRow, StoreError>;
    async fn update_job(&self, id: i64, changes: &JobChanges) -> Result<Option<JobRow>, StoreError>;
    async fn delete_job(&self, id: i64) -> Result<(), StoreError>;

    async fn list_applications(&self) -> Result<Vec<ApplicationRow>, StoreError>;
    async fn find_application(&self, id: i64) -> Result<Option<ApplicationRow>, StoreError>;
    async fn create_application(&self, application: &NewApplication) -> Result<ApplicationRow, StoreError>;
    async fn update_application(
        &self,
        id: i64,
        changes: &ApplicationChanges,
    ) -> Result<Option<ApplicationRow>, StoreError>;
    async fn delete_application(&self, id: i64) -> Result<(), StoreError>;
}
