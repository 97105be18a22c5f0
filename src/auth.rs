//! Credential resolution for the Bitbucket API
//!
//! Exactly one credential mode is resolved at client construction and used
//! for every request issued through the session afterwards. Resolution
//! order: basic (user + password), bearer (token), client-credentials
//! exchange (id + secret). Supplying none is an error before any API
//! request is attempted.

use crate::config::Credentials;
use crate::error::AppError;
use crate::model::responses::AccessTokenResponse;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, warn};

/// Resolved authentication mode attached to every request
#[derive(Debug, Clone)]
pub enum AuthMode {
    /// HTTP basic authentication with username and app password
    Basic {
        /// Username
        user: String,
        /// App password
        password: String,
    },
    /// `Authorization: Bearer <token>` authentication
    Bearer {
        /// Access token, pre-obtained or exchanged
        token: String,
    },
}

impl AuthMode {
    /// Attaches this credential to a request
    pub(crate) fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            AuthMode::Basic { user, password } => request.basic_auth(user, Some(password)),
            AuthMode::Bearer { token } => {
                request.header("Authorization", format!("Bearer {token}"))
            }
        }
    }
}

/// Resolves the active credential mode from the supplied credentials.
///
/// The client-credentials path performs a network call against the token
/// endpoint during resolution.
pub async fn resolve(
    credentials: &Credentials,
    http: &Client,
    token_url: &str,
) -> Result<AuthMode, AppError> {
    if let (Some(user), Some(password)) = (&credentials.user, &credentials.password) {
        debug!("Using basic authentication for user {}", user);
        return Ok(AuthMode::Basic {
            user: user.clone(),
            password: password.clone(),
        });
    }
    if let Some(token) = &credentials.token {
        debug!("Using bearer authentication");
        return Ok(AuthMode::Bearer {
            token: token.clone(),
        });
    }
    if let (Some(id), Some(secret)) = (&credentials.client_id, &credentials.client_secret) {
        debug!("Exchanging client credentials for an access token");
        let token = exchange_client_credentials(http, token_url, id, secret).await?;
        return Ok(AuthMode::Bearer { token });
    }
    Err(AppError::NotAuthenticated(
        "insufficient credentials".to_string(),
    ))
}

/// Performs the OAuth2 client-credentials grant.
///
/// A failed exchange surfaces as `NotAuthenticated` carrying the token
/// endpoint's message.
async fn exchange_client_credentials(
    http: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<String, AppError> {
    let response = http
        .post(token_url)
        .basic_auth(client_id, Some(client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| {
                v.get("error_description")
                    .and_then(Value::as_str)
                    .map(String::from)
            })
            .unwrap_or(text);
        warn!("Client-credentials exchange failed with status {status}: {message}");
        return Err(AppError::NotAuthenticated(message));
    }

    let token: AccessTokenResponse = response.json().await?;
    debug!("Client-credentials exchange succeeded");
    Ok(token.access_token)
}
