use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Database representation of a user (`usuario` table)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct UserRow {
    pub id_usuario: i64,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub rol: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub fecha_creacion: Option<DateTime<Utc>>,
}

/// Database representation of a job posting (`trabajo` table)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct JobRow {
    pub id_trabajo: i64,
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub ubicacion: Option<String>,
    #[serde(default)]
    pub empleador_id: Option<i64>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub fecha_publicado: Option<DateTime<Utc>>,
}

/// Public view of the employer embedded in a job listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employer {
    pub id_usuario: i64,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Job posting as returned by the read endpoints, with the employer joined in
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct JobListing {
    pub id_trabajo: i64,
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub ubicacion: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub fecha_publicado: Option<DateTime<Utc>>,
    #[serde(default)]
    pub empleador: Option<Json<Employer>>,
}

/// Database representation of an application (`postulacion` table)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ApplicationRow {
    pub id_postulacion: i64,
    #[serde(default)]
    pub trabajo_id: Option<i64>,
    #[serde(default)]
    pub usuario_id: Option<i64>,
    #[serde(default)]
    pub mensaje: Option<String>,
    #[serde(default)]
    pub oferta_pago: Option<f64>,
}

/// Lenient timestamp parsing for rows coming back from the REST backend.
///
/// `timestamptz` columns arrive as RFC 3339; plain `timestamp` columns arrive
/// without an offset and are read as UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer};

    pub fn parse(value: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
            return Some(parsed.with_timezone(&Utc));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}"))),
        }
    }
}
