use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::client::{GitHubClient, api_error_message};
use crate::error::{Error, Result};
use crate::remote::RemoteRef;

/// Title and body of the issue to create
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRequest {
    pub title: String,
    pub body: String,
}

/// Issue returned by the REST create call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueResult {
    /// REST numeric id
    pub id: u64,
    /// GraphQL node id, needed to add the issue to a project
    pub node_id: String,
    pub number: u64,
    #[serde(rename = "html_url")]
    pub url: String,
}

impl GitHubClient {
    /// Creates an issue. Not idempotent: every call creates a new issue.
    pub async fn create_issue(
        &self,
        remote: &RemoteRef,
        request: &IssueRequest,
    ) -> Result<IssueResult> {
        let url = format!(
            "{}/repos/{}/{}/issues",
            self.api_url, remote.owner, remote.repo
        );
        debug!(%url, title = %request.title, "Creating issue");

        let response = self
            .request(Method::POST, &url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::IssueCreationFailed {
                message: e.to_string(),
                hint: None,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = api_error_message(status, &body);
            let hint = token_scope_hint(status, &message, remote);
            return Err(Error::IssueCreationFailed { message, hint });
        }

        let issue = response
            .json::<IssueResult>()
            .await
            .map_err(|e| Error::IssueCreationFailed {
                message: format!("unexpected response from GitHub: {e}"),
                hint: None,
            })?;
        info!(number = issue.number, url = %issue.url, "Issue created");
        Ok(issue)
    }
}

/// Guidance for the 403 GitHub returns when a token lacks the needed scope.
fn token_scope_hint(status: StatusCode, message: &str, remote: &RemoteRef) -> Option<String> {
    if status != StatusCode::FORBIDDEN || !message.to_lowercase().contains("personal access token")
    {
        return None;
    }
    Some(format!(
        "Your token cannot create issues in {}. A classic token needs the `repo` scope \
         (plus `project` to link issues to projects); a fine-grained token needs \
         \"Issues: Read and write\" access to this repository.",
        remote.full_name()
    ))
}
