use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Names that are placeholders rather than a person's name
const GENERIC_NAMES: [&str; 5] = ["usuario", "empleado", "test", "admin", "candidato"];

/// Body of `POST /usuarios`.
///
/// Fields are optional at the type level so a missing field surfaces as the
/// "all fields are required" rule instead of a deserialization error.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[validate(schema(function = "validate_new_user"))]
pub struct NewUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rol: Option<String>,
}

/// Body of `PUT /usuarios/{id}`; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UserChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rol: Option<String>,
}

fn rule(message: &'static str) -> ValidationError {
    let mut error = ValidationError::new("user");
    error.message = Some(Cow::Borrowed(message));
    error
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Creation rules, applied in order; the first failure is reported.
fn validate_new_user(user: &NewUser) -> Result<(), ValidationError> {
    let (Some(nombre), Some(email), Some(_rol)) = (present(&user.nombre), present(&user.email), present(&user.rol))
    else {
        return Err(rule("Todos los campos son obligatorios."));
    };

    let trimmed = nombre.trim();
    // Length in UTF-16 code units, as browsers count it.
    if trimmed.encode_utf16().count() < 2 {
        return Err(rule("El nombre debe tener al menos 2 caracteres."));
    }
    if nombre.chars().any(|c| c.is_ascii_digit()) {
        return Err(rule("El nombre no puede contener números."));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(rule("El email no tiene un formato válido."));
    }
    if GENERIC_NAMES.contains(&trimmed.to_lowercase().as_str()) {
        return Err(rule("El nombre ingresado no es válido."));
    }

    Ok(())
}
