use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /trabajos`. No content rules; absent fields fall back to column defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct NewJob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ubicacion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empleador_id: Option<i64>,
}

/// Body of `PUT /trabajos/{id}`. The owning employer cannot be reassigned.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct JobChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ubicacion: Option<String>,
}
