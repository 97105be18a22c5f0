//! Asynchronous client for the Bitbucket Cloud REST API
//!
//! The client resolves its credential mode once at construction and then
//! funnels every endpoint call through a shared request/response pipeline:
//! URL resolution, credential attachment, status-to-error mapping.
//!
//! # Example
//! ```ignore
//! use bitbucket_client::client::Client;
//! use bitbucket_client::config::{Config, Credentials};
//!
//! let config = Config::with_credentials(Credentials::basic("user", "app-password"));
//! let client = Client::new(config).await?;
//! let repos = client.get_repositories(None).await?;
//! ```

use crate::auth::{self, AuthMode};
use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::error::AppError;
use crate::model::responses::Payload;
use reqwest::{Client as HttpClient, Method, Response};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

/// Query parameters passed through to list/filter endpoints
pub type Params<'a> = Option<&'a [(&'a str, &'a str)]>;

/// Immutable per-client session state.
///
/// The credential mode is fixed at construction; only the workspace may be
/// changed afterwards, through [`Client::set_workspace`].
#[derive(Debug, Clone)]
pub struct Session {
    /// Base URL all relative endpoint paths are resolved against
    pub base_url: String,
    /// Resolved credential mode
    pub(crate) auth: AuthMode,
    /// Workspace (account or team namespace) scoping all requests
    pub(crate) workspace: String,
}

/// Client for the Bitbucket Cloud REST API
pub struct Client {
    pub(crate) session: Session,
    http: HttpClient,
}

impl Client {
    /// Creates a new client, resolving the credential mode and workspace.
    ///
    /// The client-credentials path exchanges the id/secret pair for a bearer
    /// token here. When no owner is configured, the workspace is resolved by
    /// fetching the current user.
    ///
    /// # Errors
    /// * `NotAuthenticated` - no usable credentials, or the exchange failed
    /// * any transport or parse error from the workspace lookup
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let http = HttpClient::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.rest_api.timeout))
            .build()?;

        let auth = auth::resolve(&config.credentials, &http, &config.rest_api.token_url).await?;

        let mut client = Self {
            session: Session {
                base_url: config.rest_api.base_url,
                auth,
                workspace: String::new(),
            },
            http,
        };

        match config.owner {
            Some(owner) => client.session.workspace = owner,
            None => {
                let workspace = client.resolve_workspace().await?;
                info!("Resolved workspace from current user: {}", workspace);
                client.session.workspace = workspace;
            }
        }

        Ok(client)
    }

    /// Fetches the current user and reads the workspace from its `username`
    async fn resolve_workspace(&self) -> Result<String, AppError> {
        let payload = self.get("2.0/user", None).await?;
        payload
            .as_ref()
            .and_then(Payload::as_json)
            .and_then(|v| v.get("username"))
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| {
                AppError::Deserialization("user response missing username".to_string())
            })
    }

    /// Returns the workspace scoping all requests
    pub fn workspace(&self) -> &str {
        &self.session.workspace
    }

    /// Changes the workspace; all subsequent requests are scoped to it
    pub fn set_workspace(&mut self, workspace: impl Into<String>) {
        self.session.workspace = workspace.into();
    }

    /// Makes a GET request
    pub async fn get(&self, path: &str, params: Params<'_>) -> Result<Option<Payload>, AppError> {
        self.request(Method::GET, path, params, None::<&()>).await
    }

    /// Makes a POST request with a JSON body
    pub async fn post<B: Serialize>(
        &self,
        path: &str,
        params: Params<'_>,
        body: &B,
    ) -> Result<Option<Payload>, AppError> {
        self.request(Method::POST, path, params, Some(body)).await
    }

    /// Makes a PUT request with a JSON body
    pub async fn put<B: Serialize>(
        &self,
        path: &str,
        params: Params<'_>,
        body: &B,
    ) -> Result<Option<Payload>, AppError> {
        self.request(Method::PUT, path, params, Some(body)).await
    }

    /// Makes a DELETE request
    pub async fn delete(
        &self,
        path: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.request(Method::DELETE, path, params, None::<&()>)
            .await
    }

    /// Shared request pipeline: resolve URL, attach credential, send, parse
    async fn request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        params: Params<'_>,
        body: Option<&B>,
    ) -> Result<Option<Payload>, AppError> {
        let url = self.resolve_url(path);
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url);
        request = self.session.auth.apply(request);

        if let Some(params) = params {
            request = request.query(params);
        }
        if let Some(b) = body {
            request = request.json(b);
        }

        let response = request.send().await?;
        parse_response(response).await
    }

    /// Resolves a path against the base URL; absolute URLs pass through
    fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!(
                "{}/{}",
                self.session.base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        }
    }
}

/// Parses a response into a payload or a categorized error.
///
/// * 200/201/202 return the decoded payload
/// * 204 returns `None`
/// * 400/401/403/404 map to the dedicated error variants, any other
///   non-success status maps to `Unknown`; the message is taken from
///   `payload.error.message` when present, otherwise the raw body text
pub(crate) async fn parse_response(response: Response) -> Result<Option<Payload>, AppError> {
    let status = response.status();
    debug!("Response status: {}", status);

    let is_json = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false);

    let text = response.text().await?;

    match status.as_u16() {
        200 | 201 | 202 => {
            let payload = if is_json {
                Payload::Json(serde_json::from_str(&text)?)
            } else {
                Payload::Text(text)
            };
            Ok(Some(payload))
        }
        204 => Ok(None),
        code => {
            // Message extraction must never raise on its own; fall back to
            // the raw body text when the error shape is missing.
            let message = if is_json {
                serde_json::from_str::<Value>(&text)
                    .ok()
                    .and_then(|v| {
                        v.get("error")
                            .and_then(|e| e.get("message"))
                            .and_then(Value::as_str)
                            .map(String::from)
                    })
                    .unwrap_or(text)
            } else {
                text
            };
            error!("Request failed with status {}: {}", code, message);
            Err(AppError::from_status(code, message))
        }
    }
}
