//! Configuration for the Bitbucket API client
//!
//! A [`Config`] can be built explicitly or loaded from environment variables
//! (a `.env` file is honored). Exactly one credential mode must be supplied:
//! user/password, a bearer token, or an OAuth2 client id/secret pair.

use crate::constants::{BASE_URL, DEFAULT_TIMEOUT, TOKEN_URL};
use dotenv::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error};

/// Prefix shared by every environment variable this crate reads
const ENV_PREFIX: &str = "BITBUCKET_";

/// Reads a `BITBUCKET_*` environment variable; empty values count as unset
fn env_var(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}{name}"))
        .ok()
        .filter(|v| !v.is_empty())
}

/// Reads a numeric `BITBUCKET_*` environment variable, keeping the default
/// when the variable is unset or does not parse
fn env_var_u64(name: &str, default: u64) -> u64 {
    match env_var(name) {
        Some(val) => val.parse().unwrap_or_else(|_| {
            error!("Failed to parse {ENV_PREFIX}{name}: {val}, using default");
            default
        }),
        None => default,
    }
}

/// Authentication credentials for the Bitbucket API
///
/// All fields are optional at this level; the credential resolver picks the
/// active mode (basic, bearer, or client-credentials exchange) and fails when
/// none is usable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    /// Username for basic authentication
    pub user: Option<String>,
    /// App password for basic authentication
    pub password: Option<String>,
    /// Pre-obtained access token for bearer authentication
    pub token: Option<String>,
    /// OAuth2 consumer key for the client-credentials grant
    pub client_id: Option<String>,
    /// OAuth2 consumer secret for the client-credentials grant
    pub client_secret: Option<String>,
}

impl Credentials {
    /// Credentials for HTTP basic authentication
    pub fn basic(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }

    /// Credentials for bearer authentication with a pre-obtained token
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Credentials for the OAuth2 client-credentials grant
    pub fn client_credentials(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            ..Self::default()
        }
    }
}

/// Configuration for the REST API transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestApiConfig {
    /// Base URL for the Bitbucket REST API
    pub base_url: String,
    /// OAuth2 token endpoint for the client-credentials grant
    pub token_url: String,
    /// Timeout in seconds for REST API requests
    pub timeout: u64,
}

impl Default for RestApiConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Main configuration for the Bitbucket API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Authentication credentials
    pub credentials: Credentials,
    /// REST API configuration
    pub rest_api: RestApiConfig,
    /// Workspace (account or team namespace) scoping all requests.
    /// When `None`, the workspace is resolved from the authenticated user.
    pub owner: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a configuration from environment variables.
    ///
    /// Recognized variables: `BITBUCKET_USER`, `BITBUCKET_PASSWORD`,
    /// `BITBUCKET_TOKEN`, `BITBUCKET_CLIENT_ID`, `BITBUCKET_CLIENT_SECRET`,
    /// `BITBUCKET_OWNER`, `BITBUCKET_BASE_URL`, `BITBUCKET_TOKEN_URL` and
    /// `BITBUCKET_TIMEOUT`.
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        Config {
            credentials: Credentials {
                user: env_var("USER"),
                password: env_var("PASSWORD"),
                token: env_var("TOKEN"),
                client_id: env_var("CLIENT_ID"),
                client_secret: env_var("CLIENT_SECRET"),
            },
            rest_api: RestApiConfig {
                base_url: env_var("BASE_URL").unwrap_or_else(|| BASE_URL.to_string()),
                token_url: env_var("TOKEN_URL").unwrap_or_else(|| TOKEN_URL.to_string()),
                timeout: env_var_u64("TIMEOUT", DEFAULT_TIMEOUT),
            },
            owner: env_var("OWNER"),
        }
    }

    /// Creates a configuration with explicit credentials and default transport settings
    pub fn with_credentials(credentials: Credentials) -> Self {
        Config {
            credentials,
            rest_api: RestApiConfig::default(),
            owner: None,
        }
    }

    /// Sets the workspace explicitly, skipping resolution via the current user
    #[must_use]
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }
}
