use std::sync::Arc;

use tracing::info;

use super::models::{ApplicationChanges, NewApplication};
use crate::api::error::ApiError;
use crate::db::models::ApplicationRow;
use crate::db::store::Store;

const NOT_FOUND: &str = "Postulación no encontrada";

pub struct ApplicationService {
    store: Arc<dyn Store>,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<ApplicationRow>, ApiError> {
        self.store
            .list_applications()
            .await
            .map_err(ApiError::store("Error al obtener postulaciones"))
    }

    pub async fn get(&self, id: i64) -> Result<ApplicationRow, ApiError> {
        self.store
            .find_application(id)
            .await
            .map_err(ApiError::store("Error al obtener postulación"))?
            .ok_or(ApiError::NotFound(NOT_FOUND))
    }

    pub async fn create(&self, application: &NewApplication) -> Result<ApplicationRow, ApiError> {
        info!(
            "Service: Creating application for trabajo_id={:?} usuario_id={:?}",
            application.trabajo_id, application.usuario_id
        );

        let row = self
            .store
            .create_application(application)
            .await
            .map_err(ApiError::store("Error creando postulación"))?;

        info!("Service: Application created with id={}", row.id_postulacion);
        Ok(row)
    }

    pub async fn update(&self, id: i64, changes: &ApplicationChanges) -> Result<ApplicationRow, ApiError> {
        info!("Service: Updating application id={}", id);

        self.store
            .update_application(id, changes)
            .await
            .map_err(ApiError::store("Error actualizando postulación"))?
            .ok_or(ApiError::NotFound(NOT_FOUND))
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        info!("Service: Deleting application id={}", id);

        self.store
            .delete_application(id)
            .await
            .map_err(ApiError::store("Error eliminando postulación"))
    }
}
