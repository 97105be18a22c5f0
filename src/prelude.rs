//! # Bitbucket Client Prelude
//!
//! Convenient single import for the most commonly used types.
//!
//! ## Usage
//!
//! ```rust
//! use bitbucket_client::prelude::*;
//!
//! let config = Config::with_credentials(Credentials::bearer("token"));
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Configuration for the Bitbucket API client
pub use crate::config::{Config, Credentials, RestApiConfig};

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type for the library
pub use crate::error::AppError;

// ============================================================================
// CLIENT AND SESSION
// ============================================================================

/// Asynchronous client
pub use crate::client::{Client, Params, Session};

/// Resolved credential mode
pub use crate::auth::AuthMode;

/// Pagination walker
pub use crate::pagination::Paginator;

// ============================================================================
// MODELS
// ============================================================================

/// Request bodies for create/trigger endpoints
pub use crate::model::requests::{
    IssueContent, NewIssue, NewRepository, NewWebhook, PipelineTarget, ProjectKey,
};

/// Response payloads and pages
pub use crate::model::responses::{AccessTokenResponse, Page, Payload};

// ============================================================================
// UTILITIES
// ============================================================================

/// Logging utilities
pub use crate::utils::logger::setup_logger;

/// Global constants
pub use crate::constants::*;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

/// Re-export commonly used external types
pub use serde::{Deserialize, Serialize};
pub use serde_json::{Value, json};
pub use tracing::{debug, error, info, warn};
