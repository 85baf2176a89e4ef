//! The JSON envelope every endpoint answers with.
//!
//! ```text
//! { "message": string, "data": object, "errors"?: [string], "error"?: string }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
pub const COUNTRY_NOT_FOUND: &str = "Country not found";

/// Uniform response body.
#[derive(Debug, Serialize)]
pub struct Envelope<T = Value> {
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
            errors: None,
            error: None,
        }
    }

    /// Attach per-item error strings at the top level.
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Attach an underlying failure message.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn respond(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

fn empty_data() -> Value {
    Value::Object(Default::default())
}

/// 404 with an empty data object.
pub fn not_found(message: &str) -> Response {
    Envelope::new(message, empty_data()).respond(StatusCode::NOT_FOUND)
}

/// 500 with an empty data object, optionally exposing the underlying message.
pub fn internal_error(detail: Option<String>) -> Response {
    let mut envelope = Envelope::new(INTERNAL_SERVER_ERROR, empty_data());
    if let Some(detail) = detail {
        envelope = envelope.with_error(detail);
    }
    envelope.respond(StatusCode::INTERNAL_SERVER_ERROR)
}
