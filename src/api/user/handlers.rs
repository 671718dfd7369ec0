use actix_web::{
    delete, get, post, put,
    web::{Data, Path, ServiceConfig, scope},
    HttpResponse,
};
use actix_web_validator::Json;

use super::models::{NewUser, UserChanges};
use crate::api::dto::MessageResponse;
use crate::api::error::ApiError;
use crate::api::state::AppState;

#[get("")]
async fn list_users(state: Data<AppState>) -> Result<HttpResponse, ApiError> {
    let users = state.users.list().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[get("/{id}")]
async fn get_user(state: Data<AppState>, id: Path<i64>) -> Result<HttpResponse, ApiError> {
    let user = state.users.get(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json([user]))
}

#[post("")]
async fn create_user(state: Data<AppState>, user: Json<NewUser>) -> Result<HttpResponse, ApiError> {
    let row = state.users.create(&user).await?;
    Ok(HttpResponse::Created().json([row]))
}

#[put("/{id}")]
async fn update_user(
    state: Data<AppState>,
    id: Path<i64>,
    changes: Json<UserChanges>,
) -> Result<HttpResponse, ApiError> {
    let row = state.users.update(id.into_inner(), &changes).await?;
    Ok(HttpResponse::Ok().json([row]))
}

#[delete("/{id}")]
async fn delete_user(state: Data<AppState>, id: Path<i64>) -> Result<HttpResponse, ApiError> {
    state.users.delete(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Usuario eliminado correctamente",
    }))
}

pub fn user_config(config: &mut ServiceConfig) {
    config.service(
        scope("/usuarios")
            .service(list_users)
            .service(get_user)
            .service(create_user)
            .service(update_user)
            .service(delete_user),
    );
}
