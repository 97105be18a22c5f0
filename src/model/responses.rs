//! Response models from API calls

use crate::error::AppError;
use serde::Deserialize;
use serde_json::Value;

/// Decoded response body.
///
/// Dispatch is decided by the response `Content-Type` header: JSON bodies are
/// decoded into structured data, everything else is kept as raw text (e.g.
/// raw file contents from the source endpoint).
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Structured JSON payload
    Json(Value),
    /// Raw text payload
    Text(String),
}

impl Payload {
    /// Returns the structured payload, if this is JSON
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(v) => Some(v),
            Payload::Text(_) => None,
        }
    }

    /// Consumes the payload and returns the JSON value, if any
    pub fn into_json(self) -> Option<Value> {
        match self {
            Payload::Json(v) => Some(v),
            Payload::Text(_) => None,
        }
    }

    /// Returns the raw text, if this is a text payload
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Json(_) => None,
            Payload::Text(t) => Some(t),
        }
    }
}

/// One page of a paginated listing.
///
/// Bitbucket list endpoints return items under `values` with an optional
/// `next` locator pointing at the following page.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    /// Items on this page, in source order
    #[serde(default)]
    pub values: Vec<Value>,
    /// Locator for the next page; absent on the final page
    #[serde(default)]
    pub next: Option<String>,
    /// Total number of items in the listing, when the endpoint reports it
    #[serde(default)]
    pub size: Option<u64>,
}

impl Page {
    /// Decodes a page from a response payload.
    ///
    /// Fails with a deserialization error when the payload is not JSON or
    /// does not carry a `values` array.
    pub fn from_payload(payload: Payload) -> Result<Self, AppError> {
        let value = payload.into_json().ok_or_else(|| {
            AppError::Deserialization("paginated response was not JSON".to_string())
        })?;
        serde_json::from_value(value).map_err(AppError::Json)
    }
}

/// Response from the OAuth2 token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenResponse {
    /// Access token to use as a bearer credential
    pub access_token: String,
    /// Scopes granted to the token
    #[serde(default)]
    pub scopes: Option<String>,
    /// Token lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Token type, normally "bearer"
    #[serde(default)]
    pub token_type: Option<String>,
}
