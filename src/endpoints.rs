//! Endpoint surface of the Bitbucket Cloud 2.0 API
//!
//! Every method templates an endpoint path from the session workspace and
//! caller-supplied identifiers, then delegates to the shared request
//! pipeline in [`crate::client`]. No method retains state.

use crate::client::{Client, Params};
use crate::constants::PIPELINES_PAGE_SIZE;
use crate::error::AppError;
use crate::model::requests::{NewIssue, NewRepository, NewWebhook, PipelineTarget};
use crate::model::responses::{Page, Payload};
use serde_json::Value;

impl Client {
    /// Returns the currently logged in user
    pub async fn get_user(&self, params: Params<'_>) -> Result<Option<Payload>, AppError> {
        self.get("2.0/user", params).await
    }

    /// Gets a list of all the privileges across all an account's repositories.
    ///
    /// Only the repository owner, a team account administrator, or an account
    /// with administrative rights on the repository can make this call.
    pub async fn get_privileges(&self, params: Params<'_>) -> Result<Option<Payload>, AppError> {
        self.get(&format!("1.0/privileges/{}", self.workspace()), params)
            .await
    }

    /// Returns a paginated list of all repositories owned by the workspace.
    ///
    /// The result can be narrowed down with query parameters, e.g.
    /// `role=contributor` restricts to repositories the authenticated user
    /// has write access to.
    pub async fn get_repositories(&self, params: Params<'_>) -> Result<Option<Payload>, AppError> {
        self.get(&format!("2.0/repositories/{}", self.workspace()), params)
            .await
    }

    /// Returns the object describing this repository
    pub async fn get_repository(
        &self,
        repository_slug: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.get(
            &format!("2.0/repositories/{}/{}", self.workspace(), repository_slug),
            params,
        )
        .await
    }

    /// Creates a new repository.
    ///
    /// The team segment defaults to the session workspace when `team` is not
    /// given.
    pub async fn create_repository(
        &self,
        name: &str,
        team: Option<&str>,
        data: &NewRepository,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        let owner = team.unwrap_or_else(|| self.workspace());
        self.post(&format!("2.0/repositories/{owner}/{name}"), params, data)
            .await
    }

    /// Returns a paginated list of all open branches within the repository
    pub async fn get_repository_branches(
        &self,
        repository_slug: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.get(
            &format!(
                "2.0/repositories/{}/{}/refs/branches",
                self.workspace(),
                repository_slug
            ),
            params,
        )
        .await
    }

    /// Returns the tags in the repository
    pub async fn get_repository_tags(
        &self,
        repository_slug: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.get(
            &format!(
                "2.0/repositories/{}/{}/refs/tags",
                self.workspace(),
                repository_slug
            ),
            params,
        )
        .await
    }

    /// Returns the commits from the repository.
    ///
    /// Commits of a single branch can be requested with
    /// `params = Some(&[("include", "branch")])`.
    pub async fn get_repository_commits(
        &self,
        repository_slug: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.get(
            &format!(
                "2.0/repositories/{}/{}/commits",
                self.workspace(),
                repository_slug
            ),
            params,
        )
        .await
    }

    /// Returns the components that have been defined in the issue tracker.
    ///
    /// Only available on repositories that have the issue tracker enabled.
    pub async fn get_repository_components(
        &self,
        repository_slug: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.get(
            &format!(
                "2.0/repositories/{}/{}/components",
                self.workspace(),
                repository_slug
            ),
            params,
        )
        .await
    }

    /// Returns the milestones that have been defined in the issue tracker
    pub async fn get_repository_milestones(
        &self,
        repository_slug: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.get(
            &format!(
                "2.0/repositories/{}/{}/milestones",
                self.workspace(),
                repository_slug
            ),
            params,
        )
        .await
    }

    /// Returns the versions that have been defined in the issue tracker
    pub async fn get_repository_versions(
        &self,
        repository_slug: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.get(
            &format!(
                "2.0/repositories/{}/{}/versions",
                self.workspace(),
                repository_slug
            ),
            params,
        )
        .await
    }

    /// Returns the directory listing of the root directory on the main branch
    pub async fn get_repository_source_code(
        &self,
        repository_slug: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.get(
            &format!(
                "2.0/repositories/{}/{}/src",
                self.workspace(),
                repository_slug
            ),
            params,
        )
        .await
    }

    /// Returns the contents of a single file, or the listing of a directory,
    /// at the specified commit.
    ///
    /// When `path` points to a file the endpoint returns the raw contents
    /// (a text payload); for a directory it returns a paginated listing.
    pub async fn get_repository_commit_path_source_code(
        &self,
        repository_slug: &str,
        commit_hash: &str,
        path: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.get(
            &format!(
                "2.0/repositories/{}/{}/src/{}/{}",
                self.workspace(),
                repository_slug,
                commit_hash,
                path
            ),
            params,
        )
        .await
    }

    /// Returns one page of the repository's pipeline runs
    pub async fn get_repository_pipelines(
        &self,
        repository_slug: &str,
        page: Option<u64>,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.get(
            &format!(
                "2.0/repositories/{}/{}/pipelines/?page={}",
                self.workspace(),
                repository_slug,
                page.unwrap_or(1)
            ),
            params,
        )
        .await
    }

    /// Returns the most recent pipeline runs.
    ///
    /// The pipelines listing is ordered oldest-first, so the latest runs sit
    /// on the last pages. This reads the listing size, then fetches the last
    /// page and the one before it.
    pub async fn get_latest_pipelines(
        &self,
        repository_slug: &str,
    ) -> Result<Vec<Value>, AppError> {
        let first = self
            .get_repository_pipelines(repository_slug, None, None)
            .await?;
        let size = first
            .as_ref()
            .and_then(Payload::as_json)
            .and_then(|v| v.get("size"))
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                AppError::Deserialization("pipelines response missing size".to_string())
            })?;

        let last_page = size.div_ceil(PIPELINES_PAGE_SIZE).max(1);

        let mut latest = self.pipelines_page_values(repository_slug, last_page).await?;
        if last_page > 1 {
            let previous = self
                .pipelines_page_values(repository_slug, last_page - 1)
                .await?;
            latest.extend(previous);
        }
        Ok(latest)
    }

    async fn pipelines_page_values(
        &self,
        repository_slug: &str,
        page: u64,
    ) -> Result<Vec<Value>, AppError> {
        let payload = self
            .get_repository_pipelines(repository_slug, Some(page), None)
            .await?;
        match payload {
            Some(payload) => Ok(Page::from_payload(payload)?.values),
            None => Ok(Vec::new()),
        }
    }

    /// Triggers the pipeline for a branch of the repository
    pub async fn trigger_pipeline(
        &self,
        repository_slug: &str,
        branch_name: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.post(
            &format!(
                "2.0/repositories/{}/{}/pipelines/",
                self.workspace(),
                repository_slug
            ),
            params,
            &PipelineTarget::branch(branch_name),
        )
        .await
    }

    /// Creates a new issue.
    ///
    /// The authenticated user is used for the issue's reporter field. The
    /// description defaults to the empty string.
    pub async fn create_issue(
        &self,
        repository_slug: &str,
        title: &str,
        description: Option<&str>,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.post(
            &format!(
                "2.0/repositories/{}/{}/issues",
                self.workspace(),
                repository_slug
            ),
            params,
            &NewIssue::new(title, description),
        )
        .await
    }

    /// Returns the specified issue
    pub async fn get_issue(
        &self,
        repository_slug: &str,
        issue_id: u64,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.get(
            &format!(
                "2.0/repositories/{}/{}/issues/{}",
                self.workspace(),
                repository_slug,
                issue_id
            ),
            params,
        )
        .await
    }

    /// Returns the issues in the issue tracker
    pub async fn get_issues(
        &self,
        repository_slug: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.get(
            &format!(
                "2.0/repositories/{}/{}/issues",
                self.workspace(),
                repository_slug
            ),
            params,
        )
        .await
    }

    /// Deletes the specified issue. This requires write access to the repository.
    pub async fn delete_issue(
        &self,
        repository_slug: &str,
        issue_id: u64,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.delete(
            &format!(
                "2.0/repositories/{}/{}/issues/{}",
                self.workspace(),
                repository_slug,
                issue_id
            ),
            params,
        )
        .await
    }

    /// Creates a new webhook on the specified repository.
    ///
    /// Requires the webhook scope plus any scope that applies to the events
    /// the webhook subscribes to. The callback URL must resolve publicly.
    pub async fn create_webhook(
        &self,
        repository_slug: &str,
        data: &NewWebhook,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.post(
            &format!(
                "2.0/repositories/{}/{}/hooks",
                self.workspace(),
                repository_slug
            ),
            params,
            data,
        )
        .await
    }

    /// Returns the webhook with the specified id installed on the repository
    pub async fn get_webhook(
        &self,
        repository_slug: &str,
        webhook_uid: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.get(
            &format!(
                "2.0/repositories/{}/{}/hooks/{}",
                self.workspace(),
                repository_slug,
                webhook_uid
            ),
            params,
        )
        .await
    }

    /// Returns a paginated list of webhooks installed on this repository
    pub async fn get_webhooks(
        &self,
        repository_slug: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.get(
            &format!(
                "2.0/repositories/{}/{}/hooks",
                self.workspace(),
                repository_slug
            ),
            params,
        )
        .await
    }

    /// Deletes the specified webhook subscription from the repository
    pub async fn delete_webhook(
        &self,
        repository_slug: &str,
        webhook_uid: &str,
        params: Params<'_>,
    ) -> Result<Option<Payload>, AppError> {
        self.delete(
            &format!(
                "2.0/repositories/{}/{}/hooks/{}",
                self.workspace(),
                repository_slug,
                webhook_uid
            ),
            params,
        )
        .await
    }
}
