use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::{json, Value};
use thiserror::Error;

/// Message surfaced for every HTTP 500, whatever the server said.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str =
    "Error interno del servidor. Por favor, intente más tarde.";

/// Failures raised by the request gateway and passed through unchanged by accessors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Non-2xx response. `data` is the parsed error body, or `{"message": <raw text>}`.
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        data: Value,
    },
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Request timed out after {} ms", .0.as_millis())]
    Timeout(Duration),
    #[error("Request cancelled")]
    Cancelled,
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status of the failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Builds an HTTP failure from a status and raw error body.
    ///
    /// The message comes from the body's `message` field when the body is JSON,
    /// otherwise from the raw text. A 500 always surfaces the generic message.
    pub fn from_response(status: u16, body: &str) -> Self {
        let fallback = format!("HTTP error! status: {status}");
        let (message, data) = match serde_json::from_str::<Value>(body) {
            Ok(data) => {
                let message = data
                    .get("message")
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
                    .unwrap_or(fallback);
                (message, data)
            }
            Err(_) => {
                let message = if body.is_empty() {
                    fallback
                } else {
                    body.to_string()
                };
                (message, json!({ "message": body }))
            }
        };

        let message = if status == 500 {
            INTERNAL_SERVER_ERROR_MESSAGE.to_string()
        } else {
            message
        };

        ApiError::Http {
            status,
            message,
            data,
        }
    }

    pub fn not_found(id: u64) -> Self {
        let message = format!("Item not found: {id}");
        ApiError::Http {
            status: 404,
            data: json!({ "message": message }),
            message,
        }
    }
}

/// Field-level validation failures keyed by local field name.
#[derive(Debug, Clone, Default, Error, PartialEq, Eq)]
#[error("Validation failed: {}", summarize(.0))]
pub struct ValidationErrors(pub BTreeMap<String, String>);

fn summarize(errors: &BTreeMap<String, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.into(), message.into());
        Self(errors)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

/// Failures of a view operation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ViewError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("No form is open")]
    NoForm,
    #[error("No deletion is awaiting confirmation")]
    NothingToConfirm,
    #[error("Registro no encontrado: {0}")]
    UnknownRecord(u64),
}
