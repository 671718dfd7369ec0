use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /postulaciones`
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct NewApplication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trabajo_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usuario_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mensaje: Option<String>,
    /// Proposed payment; any number is accepted, including zero and negatives
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oferta_pago: Option<f64>,
}

/// Body of `PUT /postulaciones/{id}`
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct ApplicationChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mensaje: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oferta_pago: Option<f64>,
}
