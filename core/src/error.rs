//! Error types for the todo API client.
//!
//! `NotFound` and `Validation` get dedicated variants because callers act on
//! them; every other non-success response lands in `HttpError` with the raw
//! status code and body.

use thiserror::Error;

use crate::types::FieldErrors;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404, the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned 422 with a field-keyed error map.
    #[error("validation failed: {}", describe(.0))]
    Validation(FieldErrors),

    /// Any other unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),
}

fn describe(errors: &FieldErrors) -> String {
    errors
        .iter()
        .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{field} {m}")))
        .collect::<Vec<_>>()
        .join(", ")
}
