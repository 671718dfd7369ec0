use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::error;

use crate::api::state::AppState;

#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
}

/// Readiness check response
#[derive(Serialize)]
struct ReadinessResponse {
    status: &'static str,
    backend: &'static str,
    database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[get("/")]
async fn home(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().content_type("text/html; charset=utf-8").body(format!(
        "<h1>MiniChangApp backend running</h1>\n<p>Environment: {}</p>\n",
        state.environment
    ))
}

/// Liveness: the process answers, dependencies are not checked.
#[get("/health")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(StatusResponse { status: "ok" })
}

/// Readiness check endpoint
///
/// Round-trips to the selected store. Returns 503 while it is unreachable;
/// the process recovers on its own once the backend returns.
#[get("/ready")]
async fn readiness_check(state: web::Data<AppState>) -> impl Responder {
    let backend = state.store.backend();
    match state.store.ping().await {
        Ok(()) => HttpResponse::Ok().json(ReadinessResponse {
            status: "ready",
            backend,
            database: "connected",
            error: None,
        }),
        Err(e) => {
            error!("Readiness check failed: {} backend unavailable: {}", backend, e);
            HttpResponse::ServiceUnavailable().json(ReadinessResponse {
                status: "not_ready",
                backend,
                database: "disconnected",
                error: Some(e.to_string()),
            })
        }
    }
}

pub fn health_config(config: &mut web::ServiceConfig) {
    config
        .service(home)
        .service(health_check)
        .service(readiness_check);
}
