//! Error types for the todo API client.
//!
//! # Design
//! The view treats every failure the same way (log and swallow), so the
//! taxonomy stays flat: a request either never completed (`Transport`), came
//! back with a non-success status (`Http`, raw status and body kept for the
//! log), or carried a payload we could not encode or decode.

use std::fmt;

/// Errors produced while building requests or interpreting responses.
#[derive(Debug)]
pub enum ApiError {
    /// The host could not complete the HTTP round-trip at all.
    Transport(String),

    /// The server returned a status other than the expected success code.
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    Deserialize(String),

    /// The request payload could not be serialized to JSON.
    Serialize(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
            ApiError::Http { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::Deserialize(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::Serialize(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
