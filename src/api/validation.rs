use actix_web::error::JsonPayloadError;
use actix_web::{web, HttpResponse};
use actix_web_validator::error::DeserializeErrors;
use serde::Serialize;
use serde_json::error::Category;
use tracing::debug;

const INVALID_DATA: &str = "Datos inválidos.";
const EMPTY_BODY: &str = "El cuerpo de la solicitud está vacío. Se esperaba JSON.";
const INVALID_JSON: &str = "El cuerpo de la solicitud no es JSON válido.";
const WRONG_TYPE: &str = "Uno de los campos tiene un tipo de dato inválido.";
const TOO_LARGE: &str = "El cuerpo de la solicitud es demasiado grande.";

/// Error envelope shared by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

fn bad_request(response: ErrorResponse) -> actix_web::Error {
    actix_web::error::InternalError::from_response("", HttpResponse::BadRequest().json(response)).into()
}

/// Creates a configured JsonConfig with standardized error handling for the entire project
///
/// Every rejection is a plain `{ "error": message }`; the first rule failure
/// wins, struct-level rules (reported under `__all__`) first.
pub fn json_config(limit: usize) -> actix_web_validator::JsonConfig {
    actix_web_validator::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            debug!("Rejected request body: {}", err);

            match err {
                actix_web_validator::Error::Validate(validation_errors) => {
                    let field_errors = validation_errors.field_errors();
                    let message = field_errors
                        .get("__all__")
                        .or_else(|| field_errors.values().next())
                        .and_then(|errors| errors.first())
                        .and_then(|error| error.message.as_ref())
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| INVALID_DATA.to_string());
                    bad_request(ErrorResponse::new(message))
                }
                actix_web_validator::Error::JsonPayloadError(payload_err) => {
                    bad_request(ErrorResponse::new(payload_message(&payload_err)))
                }
                actix_web_validator::Error::Deserialize(DeserializeErrors::DeserializeJson(json_err)) => {
                    bad_request(ErrorResponse::new(json_message(&json_err)))
                }
                _ => bad_request(ErrorResponse::new(INVALID_JSON)),
            }
        })
}

fn payload_message(err: &JsonPayloadError) -> &'static str {
    match err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => TOO_LARGE,
        JsonPayloadError::Deserialize(json_err) => json_message(json_err),
        _ => INVALID_JSON,
    }
}

/// Only a body with nothing in it counts as empty; a cut-off document is invalid JSON.
fn json_message(err: &serde_json::Error) -> &'static str {
    match err.classify() {
        Category::Eof if err.line() == 1 && err.column() == 0 => EMPTY_BODY,
        Category::Data => WRONG_TYPE,
        _ => INVALID_JSON,
    }
}

/// Path extractor config: a non-numeric `{id}` is a client error, not a missing route
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        debug!("Rejected path parameter: {}", err);
        bad_request(ErrorResponse::new("El identificador debe ser un número entero."))
    })
}
