//! Blocking variant of the Bitbucket client
//!
//! Mirrors the async [`crate::client::Client`] with identical method
//! signatures, driving it on an internally owned current-thread tokio
//! runtime — the same approach `reqwest::blocking` takes. Each call blocks
//! the calling thread until the request completes.
//!
//! # Example
//! ```ignore
//! use bitbucket_client::blocking::Client;
//! use bitbucket_client::config::{Config, Credentials};
//!
//! let config = Config::with_credentials(Credentials::bearer("token"));
//! let client = Client::new(config)?;
//! for item in client.all_pages(client.get_repositories(None)?)? {
//!     println!("{}", item?["name"]);
//! }
//! ```

use crate::client::Params;
use crate::config::Config;
use crate::error::AppError;
use crate::model::requests::{NewRepository, NewWebhook};
use crate::model::responses::Payload;
use crate::pagination;
use serde::Serialize;
use serde_json::Value;
use tokio::runtime::{Builder, Runtime};

/// Blocking client for the Bitbucket Cloud REST API
pub struct Client {
    inner: crate::client::Client,
    rt: Runtime,
}

impl Client {
    /// Creates a new blocking client.
    ///
    /// Performs the same construction-time work as the async client:
    /// credential resolution (including the client-credentials exchange)
    /// and workspace lookup when no owner is configured.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let rt = Builder::new_current_thread().enable_all().build()?;
        let inner = rt.block_on(crate::client::Client::new(config))?;
        Ok(Self { inner, rt })
    }

    /// Returns the workspace scoping all requests
    pub fn workspace(&self) -> &str {
        self.inner.workspace()
    }

    /// Changes the workspace; all subsequent requests are scoped to it
    pub fn set_workspace(&mut self, workspace: impl Into<String>) {
        self.inner.set_workspace(workspace);
    }

    /// Makes a GET request
    pub fn get(&self, path: &str, params: Params<'_>) -> Result<Option<Payload>, AppError> {
        self.rt.block_on(self.inner.get(path, params))
    }

    /// Makes a POST request with a JSON body
    pub fn post<B: Serialize>(
        &self,
        path: &str,
        params: Params<'_>,
        body: &B,
    ) -> Result<Option<Payload>, AppError> {
        self.rt.block_on(self.inner.post(path, params, body))
    }

    /// Makes a PUT request with a JSON body
    pub fn put<B: Serialize>(
        &self,
        path: &str,
        params: Params<'_>,
        body: &B,
    ) -> Result<Option<Payload>, AppError> {
        self.rt.block_on(self.inner.put(path, params, body))
    }

    /// Makes a DELETE request
    pub fn delete(&self, path: &str, params: Params<'_>) -> Result<Option<Payload>, AppError> {
        self.rt.block_on(self.inner.delete(path, params))
    }

    /// Walks every page of a paginated listing, starting from `first_page`
    pub fn all_pages(&self, first_page: Option<Payload>) -> Result<Paginator<'_>, AppError> {
        Ok(Paginator {
            rt: &self.rt,
            inner: self.inner.all_pages(first_page)?,
        })
    }

    /// Returns the currently logged in user
    pub fn get_user(&self, params: Params<'_>) -> Result<Option<Payload>, AppError> {
        self.rt.block_on(self.inner.get_user(params))
    }

    /// Gets a list of all the privileges across all an account's repositories
    pub fn get_privileges(&self, params: Params<'_>) -> Result<Option<Payload>, AppError> {
        self.rt.block_on(self.inner.get_privileges(params))
    }

    /// Returns a paginated list of all repositories owned by the workspace
    pub fn get_repositories(&self, params: Params<'_>) -> Result<Option<Payload>, AppError> {
        self.rt.block_on(self.inner.get_repositories(params))
    }

    /// Returns the object describing this repository
    pub fn get_repository(
        &self,
        repository_slug: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.rt
            .block_on(self.inner.get_repository(repository_slug, params))
    }

    /// Creates a new repository
    pub fn create_repository(
        &self,
        name: &str,
        team: Option<&str>,
        data: &NewRepository,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.rt
            .block_on(self.inner.create_repository(name, team, data, params))
    }

    /// Returns a paginated list of all open branches within the repository
    pub fn get_repository_branches(
        &self,
        repository_slug: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.rt
            .block_on(self.inner.get_repository_branches(repository_slug, params))
    }

    /// Returns the tags in the repository
    pub fn get_repository_tags(
        &self,
        repository_slug: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.rt
            .block_on(self.inner.get_repository_tags(repository_slug, params))
    }

    /// Returns the commits from the repository
    pub fn get_repository_commits(
        &self,
        repository_slug: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.rt
            .block_on(self.inner.get_repository_commits(repository_slug, params))
    }

    /// Returns the components that have been defined in the issue tracker
    pub fn get_repository_components(
        &self,
        repository_slug: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.rt
            .block_on(self.inner.get_repository_components(repository_slug, params))
    }

    /// Returns the milestones that have been defined in the issue tracker
    pub fn get_repository_milestones(
        &self,
        repository_slug: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.rt
            .block_on(self.inner.get_repository_milestones(repository_slug, params))
    }

    /// Returns the versions that have been defined in the issue tracker
    pub fn get_repository_versions(
        &self,
        repository_slug: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.rt
            .block_on(self.inner.get_repository_versions(repository_slug, params))
    }

    /// Returns the directory listing of the root directory on the main branch
    pub fn get_repository_source_code(
        &self,
        repository_slug: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.rt
            .block_on(self.inner.get_repository_source_code(repository_slug, params))
    }

    /// Returns the contents of a single file, or the listing of a directory,
    /// at the specified commit
    pub fn get_repository_commit_path_source_code(
        &self,
        repository_slug: &str,
        commit_hash: &str,
        path: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.rt.block_on(self.inner.get_repository_commit_path_source_code(
            repository_slug,
            commit_hash,
            path,
            params,
        ))
    }

    /// Returns one page of the repository's pipeline runs
    pub fn get_repository_pipelines(
        &self,
        repository_slug: &str,
        page: Option<u64>,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.rt
            .block_on(self.inner.get_repository_pipelines(repository_slug, page, params))
    }

    /// Returns the most recent pipeline runs
    pub fn get_latest_pipelines(&self, repository_slug: &str) -> Result<Vec<Value>, AppError> {
        self.rt.block_on(self.inner.get_latest_pipelines(repository_slug))
    }

    /// Triggers the pipeline for a branch of the repository
    pub fn trigger_pipeline(
        &self,
        repository_slug: &str,
        branch_name: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.rt
            .block_on(self.inner.trigger_pipeline(repository_slug, branch_name, params))
    }

    /// Creates a new issue
    pub fn create_issue(
        &self,
        repository_slug: &str,
        title: &str,
        description: Option<&str>,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.rt
            .block_on(self.inner.create_issue(repository_slug, title, description, params))
    }

    /// Returns the specified issue
    pub fn get_issue(
        &self,
        repository_slug: &str,
        issue_id: u64,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.rt
            .block_on(self.inner.get_issue(repository_slug, issue_id, params))
    }

    /// Returns the issues in the issue tracker
    pub fn get_issues(
        &self,
        repository_slug: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.rt.block_on(self.inner.get_issues(repository_slug, params))
    }

    /// Deletes the specified issue
    pub fn delete_issue(
        &self,
        repository_slug: &str,
        issue_id: u64,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.rt
            .block_on(self.inner.delete_issue(repository_slug, issue_id, params))
    }

    /// Creates a new webhook on the specified repository
    pub fn create_webhook(
        &self,
        repository_slug: &str,
        data: &NewWebhook,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.rt
            .block_on(self.inner.create_webhook(repository_slug, data, params))
    }

    /// Returns the webhook with the specified id installed on the repository
    pub fn get_webhook(
        &self,
        repository_slug: &str,
        webhook_uid: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.rt
            .block_on(self.inner.get_webhook(repository_slug, webhook_uid, params))
    }

    /// Returns a paginated list of webhooks installed on this repository
    pub fn get_webhooks(
        &self,
        repository_slug: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.rt.block_on(self.inner.get_webhooks(repository_slug, params))
    }

    /// Deletes the specified webhook subscription from the repository
    pub fn delete_webhook(
        &self,
        repository_slug: &str,
        webhook_uid: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.rt
            .block_on(self.inner.delete_webhook(repository_slug, webhook_uid, params))
    }
}

/// Blocking iterator over every item of a paginated listing
pub struct Paginator<'a> {
    rt: &'a Runtime,
    inner: pagination::Paginator<'a>,
}

impl Iterator for Paginator<'_> {
    type Item = Result<Value, AppError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.rt.block_on(self.inner.try_next()) {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
