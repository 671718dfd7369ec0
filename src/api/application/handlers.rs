use actix_web::{
    delete, get, post, put,
    web::{Data, Path, ServiceConfig, scope},
    HttpResponse,
};
use actix_web_validator::Json;

use super::models::{ApplicationChanges, NewApplication};
use crate::api::dto::MessageResponse;
use crate::api::error::ApiError;
use crate::api::state::AppState;

#[get("")]
async fn list_applications(state: Data<AppState>) -> Result<HttpResponse, ApiError> {
    let applications = state.applications.list().await?;
    Ok(HttpResponse::Ok().json(applications))
}

#[get("/{id}")]
async fn get_application(state: Data<AppState>, id: Path<i64>) -> Result<HttpResponse, ApiError> {
    let application = state.applications.get(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json([application]))
}

#[post("")]
async fn create_application(
    state: Data<AppState>,
    application: Json<NewApplication>,
) -> Result<HttpResponse, ApiError> {
    let row = state.applications.create(&application).await?;
    Ok(HttpResponse::Created().json([row]))
}

#[put("/{id}")]
async fn update_application(
    state: Data<AppState>,
    id: Path<i64>,
    changes: Json<ApplicationChanges>,
) -> Result<HttpResponse, ApiError> {
    let row = state.applications.update(id.into_inner(), &changes).await?;
    Ok(HttpResponse::Ok().json([row]))
}

#[delete("/{id}")]
async fn delete_application(state: Data<AppState>, id: Path<i64>) -> Result<HttpResponse, ApiError> {
    state.applications.delete(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Postulación eliminada correctamente",
    }))
}

pub fn application_config(config: &mut ServiceConfig) {
    config.service(
        scope("/postulaciones")
            .service(list_applications)
            .service(get_application)
            .service(create_application)
            .service(update_application)
            .service(delete_application),
    );
}
