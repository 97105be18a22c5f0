//! Request models for API calls
//!
//! Each create/trigger endpoint takes a typed body; the shapes follow the
//! Bitbucket Cloud 2.0 API documentation.

use serde::{Deserialize, Serialize};

/// Body for repository creation
///
/// Example:
/// ```json
/// {
///   "scm": "git",
///   "description": "Repository Description",
///   "is_private": true,
///   "project": { "key": "MARS" }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRepository {
    /// Source control system, normally "git"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scm: Option<String>,
    /// Repository description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the repository is private
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    /// Project the repository belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectKey>,
}

/// Project reference by key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectKey {
    /// Project key
    pub key: String,
}

/// Body for issue creation.
///
/// The API requires a `title`; the description is nested under
/// `content.raw` and defaults to the empty string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIssue {
    /// Issue title
    pub title: String,
    /// Issue description
    pub content: IssueContent,
}

/// Raw-text content wrapper used by the issue tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueContent {
    /// Description text
    pub raw: String,
}

impl NewIssue {
    /// Builds an issue body from a title and an optional description
    pub fn new(title: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            title: title.into(),
            content: IssueContent {
                raw: description.unwrap_or_default().to_string(),
            },
        }
    }
}

/// Body for webhook creation
///
/// Example:
/// ```json
/// {
///   "description": "Webhook Description",
///   "url": "https://example.com/",
///   "active": true,
///   "events": ["repo:push", "issue:created", "issue:updated"]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWebhook {
    /// Webhook description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Callback URL; must resolve publicly
    pub url: String,
    /// Whether the webhook is active
    pub active: bool,
    /// Events the webhook subscribes to
    pub events: Vec<String>,
}

/// Body for triggering a pipeline run on a branch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineTarget {
    target: BranchTarget,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BranchTarget {
    ref_type: String,
    #[serde(rename = "type")]
    target_type: String,
    ref_name: String,
}

impl PipelineTarget {
    /// Pipeline target for the given branch name
    pub fn branch(name: impl Into<String>) -> Self {
        Self {
            target: BranchTarget {
                ref_type: "branch".to_string(),
                target_type: "pipeline_ref_target".to_string(),
                ref_name: name.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    #[test]
    fn test_new_issue_shapes_description_under_content_raw() {
        let issue = NewIssue::new("title of the issue", Some("this should be the description"));
        assert_json_eq!(
            serde_json::to_value(&issue).unwrap(),
            json!({
                "title": "title of the issue",
                "content": {"raw": "this should be the description"}
            })
        );
    }

    #[test]
    fn test_new_issue_description_defaults_empty() {
        let issue = NewIssue::new("bug", None);
        assert_json_eq!(
            serde_json::to_value(&issue).unwrap(),
            json!({"title": "bug", "content": {"raw": ""}})
        );
    }

    #[test]
    fn test_pipeline_target_body() {
        let target = PipelineTarget::branch("main");
        assert_json_eq!(
            serde_json::to_value(&target).unwrap(),
            json!({
                "target": {
                    "ref_type": "branch",
                    "type": "pipeline_ref_target",
                    "ref_name": "main"
                }
            })
        );
    }

    #[test]
    fn test_new_repository_skips_absent_fields() {
        let repo = NewRepository {
            scm: Some("git".to_string()),
            ..NewRepository::default()
        };
        assert_json_eq!(serde_json::to_value(&repo).unwrap(), json!({"scm": "git"}));
    }
}
