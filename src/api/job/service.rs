use std::sync::Arc;

use tracing::info;

use super::models::{JobChanges, NewJob};
use crate::api::error::ApiError;
use crate::db::models::{JobListing, JobRow};
use crate::db::store::Store;

const NOT_FOUND: &str = "Trabajo no encontrado";

/// Job posting service
pub struct JobService {
    store: Arc<dyn Store>,
}

impl JobService {
    /// Create a new JobService instance
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// All postings with their employer embedded
    pub async fn list(&self) -> Result<Vec<JobListing>, ApiError> {
        self.store
            .list_jobs()
            .await
            .map_err(ApiError::store("Error al obtener trabajos"))
    }

    pub async fn get(&self, id: i64) -> Result<JobListing, ApiError> {
        self.store
            .find_job(id)
            .await
            .map_err(ApiError::store("Error al obtener trabajo"))?
            .ok_or(ApiError::NotFound(NOT_FOUND))
    }

    /// Create a single job
    ///
    /// Fields are forwarded unchecked; the database decides what it accepts.
    pub async fn create(&self, job: &NewJob) -> Result<JobRow, ApiError> {
        info!("Service: Creating job with titulo={:?}", job.titulo);

        let row = self
            .store
            .create_job(job)
            .await
            .map_err(ApiError::store("Error creando trabajo"))?;

        info!("Service: Job created successfully with id={}", row.id_trabajo);
        Ok(row)
    }

    pub async fn update(&self, id: i64, changes: &JobChanges) -> Result<JobRow, ApiError> {
        info!("Service: Updating job id={}", id);

        self.store
            .update_job(id, changes)
            .await
            .map_err(ApiError::store("Error actualizando trabajo"))?
            .ok_or(ApiError::NotFound(NOT_FOUND))
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        info!("Service: Deleting job id={}", id);

        self.store
            .delete_job(id)
            .await
            .map_err(ApiError::store("Error eliminando trabajo"))
    }
}
