use actix_web::{
    delete, get, post, put,
    web::{Data, Path, ServiceConfig, scope},
    HttpResponse,
};
use actix_web_validator::Json;

use super::models::{JobChanges, NewJob};
use crate::api::dto::MessageResponse;
use crate::api::error::ApiError;
use crate::api::state::AppState;

#[get("")]
async fn list_jobs(state: Data<AppState>) -> Result<HttpResponse, ApiError> {
    let jobs = state.jobs.list().await?;
    Ok(HttpResponse::Ok().json(jobs))
}

#[get("/{id}")]
async fn get_job(state: Data<AppState>, id: Path<i64>) -> Result<HttpResponse, ApiError> {
    let job = state.jobs.get(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json([job]))
}

#[post("")]
async fn create_job(state: Data<AppState>, job: Json<NewJob>) -> Result<HttpResponse, ApiError> {
    let row = state.jobs.create(&job).await?;
    Ok(HttpResponse::Created().json([row]))
}

#[put("/{id}")]
async fn update_job(
    state: Data<AppState>,
    id: Path<i64>,
    changes: Json<JobChanges>,
) -> Result<HttpResponse, ApiError> {
    let row = state.jobs.update(id.into_inner(), &changes).await?;
    Ok(HttpResponse::Ok().json([row]))
}

#[delete("/{id}")]
async fn delete_job(state: Data<AppState>, id: Path<i64>) -> Result<HttpResponse, ApiError> {
    state.jobs.delete(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Trabajo eliminado correctamente",
    }))
}

pub fn job_config(config: &mut ServiceConfig) {
    config.service(
        scope("/trabajos")
            .service(list_jobs)
            .service(get_job)
            .service(create_job)
            .service(update_job)
            .service(delete_job),
    );
}

#[cfg(test)]
mod tests {
    use crate::test_support::{app, Failure, MemoryStore};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn list_embeds_employer() {
        let store = MemoryStore::default();
        let owner = store.seed_user("Ana Gómez", "ana@correo.com", "empleador");
        store.seed_job("Limpieza de oficina", Some(owner));
        store.seed_job("Sin empleador", None);
        let app = test::init_service(app(store)).await;

        let req = test::TestRequest::get().uri("/trabajos").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body[0]["empleador"], json!({ "id_usuario": owner, "nombre": "Ana Gómez", "email": "ana@correo.com" }));
        assert!(body[0].get("empleador_id").is_none());
        assert!(body[1]["empleador"].is_null());
    }

    #[actix_web::test]
    async fn get_unknown_job_is_404() {
        let app = test::init_service(app(MemoryStore::default())).await;

        let req = test::TestRequest::get().uri("/trabajos/77").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Trabajo no encontrado");
    }

    #[actix_web::test]
    async fn create_accepts_missing_and_empty_fields() {
        let app = test::init_service(app(MemoryStore::default())).await;

        let payloads = [
            json!({ "descripcion": "Descripción del trabajo", "ubicacion": "Córdoba", "empleador_id": 1 }),
            json!({ "titulo": "", "descripcion": "", "ubicacion": "" }),
            json!({ "titulo": "A".repeat(200), "descripcion": "A".repeat(10_000) }),
        ];

        for payload in payloads {
            let req = test::TestRequest::post().uri("/trabajos").set_json(&payload).to_request();
            let resp = test::call_service(&app, req).await;

            assert_eq!(resp.status(), StatusCode::CREATED, "{payload}");
            let body: Value = test::read_body_json(resp).await;
            assert!(body[0]["id_trabajo"].is_i64());
        }
    }

    #[actix_web::test]
    async fn create_returns_raw_row_with_employer_id() {
        let app = test::init_service(app(MemoryStore::default())).await;

        let req = test::TestRequest::post()
            .uri("/trabajos")
            .set_json(json!({
                "titulo": "Limpieza de oficina",
                "descripcion": "Se necesita limpieza profunda",
                "ubicacion": "Córdoba Capital",
                "empleador_id": 4
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body[0]["titulo"], "Limpieza de oficina");
        assert_eq!(body[0]["empleador_id"], 4);
    }

    #[actix_web::test]
    async fn create_with_string_employer_id_is_400() {
        let app = test::init_service(app(MemoryStore::default())).await;

        let req = test::TestRequest::post()
            .uri("/trabajos")
            .set_json(json!({ "titulo": "X", "empleador_id": "uno" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn update_changes_only_present_fields() {
        let store = MemoryStore::default();
        let id = store.seed_job("Pintura", Some(1));
        let app = test::init_service(app(store)).await;

        let req = test::TestRequest::put()
            .uri(&format!("/trabajos/{id}"))
            .set_json(json!({ "ubicacion": "Rosario" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body[0]["ubicacion"], "Rosario");
        assert_eq!(body[0]["titulo"], "Pintura");
    }

    #[actix_web::test]
    async fn update_unknown_job_is_404() {
        let app = test::init_service(app(MemoryStore::default())).await;

        let req = test::TestRequest::put()
            .uri("/trabajos/12")
            .set_json(json!({ "titulo": "Nuevo" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn backend_errors_map_per_operation() {
        let store = MemoryStore::default();
        store.fail_with(Failure::Rejected("Update error".into()));
        let app = test::init_service(app(store.clone())).await;

        let req = test::TestRequest::put()
            .uri("/trabajos/1")
            .set_json(json!({ "titulo": "Updated" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Update error");

        store.fail_with(Failure::Unavailable);
        let req = test::TestRequest::delete().uri("/trabajos/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Error eliminando trabajo");
    }

    #[actix_web::test]
    async fn delete_returns_message() {
        let store = MemoryStore::default();
        let id = store.seed_job("Pintura", None);
        let app = test::init_service(app(store)).await;

        let req = test::TestRequest::delete().uri(&format!("/trabajos/{id}")).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, json!({ "message": "Trabajo eliminado correctamente" }));
    }
}
