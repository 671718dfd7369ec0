use std::sync::Arc;

use tracing::info;

use super::models::{NewUser, UserChanges};
use crate::api::error::ApiError;
use crate::db::models::UserRow;
use crate::db::store::Store;

const NOT_FOUND: &str = "Usuario no encontrado";

/// User operations over the selected store
pub struct UserService {
    store: Arc<dyn Store>,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<UserRow>, ApiError> {
        self.store
            .list_users()
            .await
            .map_err(ApiError::store("Error interno en /usuarios"))
    }

    pub async fn get(&self, id: i64) -> Result<UserRow, ApiError> {
        self.store
            .find_user(id)
            .await
            .map_err(ApiError::store("Error interno al obtener usuario"))?
            .ok_or(ApiError::NotFound(NOT_FOUND))
    }

    /// Create a user. The body has already passed the creation rules.
    pub async fn create(&self, user: &NewUser) -> Result<UserRow, ApiError> {
        info!("Service: Creating user with email={:?}", user.email);

        let row = self
            .store
            .create_user(user)
            .await
            .map_err(ApiError::store("Error al crear usuario"))?;

        info!("Service: User created with id={}", row.id_usuario);
        Ok(row)
    }

    pub async fn update(&self, id: i64, changes: &UserChanges) -> Result<UserRow, ApiError> {
        info!("Service: Updating user id={}", id);

        self.store
            .update_user(id, changes)
            .await
            .map_err(ApiError::store("Error actualizando usuario"))?
            .ok_or(ApiError::NotFound(NOT_FOUND))
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        info!("Service: Deleting user id={}", id);

        self.store
            .delete_user(id)
            .await
            .map_err(ApiError::store("Error eliminando usuario"))
    }
}
