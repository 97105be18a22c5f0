//! Error types for the Bitbucket API client
//!
//! Every non-success HTTP status maps to exactly one variant carrying a
//! best-effort human-readable message extracted from the response body.
//! Errors are never recovered locally; they propagate to the caller.

use std::fmt;

/// Main error type for the library
#[derive(Debug)]
pub enum AppError {
    /// Malformed request, HTTP 400
    InvalidRequest(String),
    /// Missing or invalid credentials, HTTP 401 or no credential mode at construction
    NotAuthenticated(String),
    /// Authorization failure, HTTP 403
    PermissionDenied(String),
    /// Missing resource, HTTP 404
    NotFound(String),
    /// Any other non-success HTTP status
    Unknown(String),
    /// Underlying HTTP transport error
    Request(reqwest::Error),
    /// JSON encoding/decoding error
    Json(serde_json::Error),
    /// Response body did not have the expected shape
    Deserialization(String),
    /// I/O error (e.g. spawning the blocking runtime)
    Io(std::io::Error),
}

impl AppError {
    /// Maps an HTTP status code to the corresponding error variant.
    ///
    /// Only called for non-success, non-204 statuses; 400/401/403/404 have
    /// dedicated variants, everything else is `Unknown`.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => AppError::InvalidRequest(message),
            401 => AppError::NotAuthenticated(message),
            403 => AppError::PermissionDenied(message),
            404 => AppError::NotFound(message),
            _ => AppError::Unknown(message),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidRequest(msg) => write!(f, "invalid request: {msg}"),
            AppError::NotAuthenticated(msg) => write!(f, "not authenticated: {msg}"),
            AppError::PermissionDenied(msg) => write!(f, "permission denied: {msg}"),
            AppError::NotFound(msg) => write!(f, "not found: {msg}"),
            AppError::Unknown(msg) => write!(f, "unknown api error: {msg}"),
            AppError::Request(e) => write!(f, "request error: {e}"),
            AppError::Json(e) => write!(f, "json error: {e}"),
            AppError::Deserialization(msg) => write!(f, "deserialization error: {msg}"),
            AppError::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Request(e) => Some(e),
            AppError::Json(e) => Some(e),
            AppError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Request(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e)
    }
}
