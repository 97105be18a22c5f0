//! # Bitbucket Client
//!
//! A credentialed client for the Bitbucket Cloud 2.0 REST API.
//!
//! The client supports three authentication modes — HTTP basic
//! (user + app password), bearer token, and an OAuth2 client-credentials
//! exchange — resolved once at construction and used for every request.
//! Endpoint methods cover the current user, repositories, branches, tags,
//! commits, issue tracker objects, source-code retrieval, pipelines and
//! webhooks, with a pagination walker that flattens multi-page listings
//! into a lazy item sequence.
//!
//! ## Quick start
//!
//! ```ignore
//! use bitbucket_client::prelude::*;
//!
//! let config = Config::with_credentials(Credentials::basic("user", "app-password"));
//! let client = Client::new(config).await?;
//!
//! let first = client.get_issues("my-repo", None).await?;
//! let mut issues = client.all_pages(first)?;
//! while let Some(issue) = issues.try_next().await? {
//!     println!("{}", issue["id"]);
//! }
//! ```
//!
//! A blocking variant with identical method signatures lives in
//! [`blocking`].

/// Credential resolution (basic, bearer, client-credentials exchange)
pub mod auth;
/// Blocking client variant
pub mod blocking;
/// Asynchronous client and the shared request/response pipeline
pub mod client;
/// Configuration loading and credential construction
pub mod config;
/// Global constants
pub mod constants;
/// Endpoint surface of the Bitbucket Cloud 2.0 API
pub mod endpoints;
/// Error types
pub mod error;
/// Request and response models
pub mod model;
/// Pagination walker for list endpoints
pub mod pagination;
/// Commonly used types and traits
pub mod prelude;
/// Environment and logging utilities
pub mod utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
pub fn version() -> &'static str {
    VERSION
}
