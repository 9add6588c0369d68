//! # Framework Errors
//!
//! This module defines the common error types used throughout the sync framework.
//! Actor plumbing failures and remote transport failures are kept apart so callers can
//! tell "the slice is gone" from "the server said no".

use serde_json::Value;

/// Errors that can occur within the slice actor plumbing itself.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
}

/// Errors produced by a [`Transport`](crate::transport::Transport) call.
///
/// The three failure families of a remote operation map onto these variants:
/// no response at all (`Network`), a response carrying an error status (`Status`), and a
/// response that could not be understood (`Decode`).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response (connection refused, timeout, DNS...).
    #[error("{0}")]
    Network(String),

    /// The server answered with a non-success status. `body` holds the parsed JSON body
    /// when the server sent one.
    #[error("Request failed with status code {status}")]
    Status { status: u16, body: Option<Value> },

    /// A success response whose body did not have the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// A request payload could not be serialized.
    #[error("Invalid request body: {0}")]
    Encode(String),

    /// The request path could not be joined onto the base URL.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    /// The `message` field of the server's error body, when present and non-empty.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            TransportError::Status {
                body: Some(body), ..
            } => body
                .get("message")
                .and_then(Value::as_str)
                .filter(|message| !message.trim().is_empty()),
            _ => None,
        }
    }

    /// HTTP status attached to the failure, if the server responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
