//! Projects v2 lookup and linking.

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use super::client::GitHubClient;
use crate::error::{Error, Result};

/// Number of projects requested per scope
pub const PROJECT_PAGE_SIZE: u32 = 20;

const REPOSITORY_PROJECTS_QUERY: &str = r#"
    query($owner: String!, $name: String!, $first: Int!) {
        repository(owner: $owner, name: $name) {
            projectsV2(first: $first) {
                nodes { id title number }
            }
        }
    }
"#;

const ORGANIZATION_PROJECTS_QUERY: &str = r#"
    query($login: String!, $first: Int!) {
        organization(login: $login) {
            projectsV2(first: $first) {
                nodes { id title number }
            }
        }
    }
"#;

const ADD_ITEM_MUTATION: &str = r#"
    mutation($projectId: ID!, $contentId: ID!) {
        addProjectV2ItemById(input: {projectId: $projectId, contentId: $contentId}) {
            item { id }
        }
    }
"#;

/// A GitHub Projects v2 board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// GraphQL node id
    pub id: String,
    pub name: String,
    pub number: u64,
}

#[derive(Debug, Deserialize)]
struct RepositoryProjects {
    repository: Option<ProjectsOwner>,
}

#[derive(Debug, Deserialize)]
struct OrganizationProjects {
    organization: Option<ProjectsOwner>,
}

#[derive(Debug, Deserialize)]
struct ProjectsOwner {
    #[serde(rename = "projectsV2")]
    projects_v2: ProjectConnection,
}

#[derive(Debug, Deserialize)]
struct ProjectConnection {
    nodes: Vec<Option<ProjectNode>>,
}

#[derive(Debug, Deserialize)]
struct ProjectNode {
    id: String,
    title: String,
    number: u64,
}

impl From<ProjectNode> for Project {
    fn from(node: ProjectNode) -> Self {
        Project {
            id: node.id,
            name: node.title,
            number: node.number,
        }
    }
}

impl ProjectConnection {
    fn into_projects(self) -> Vec<Project> {
        self.nodes.into_iter().flatten().map(Project::from).collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddItemData {
    add_project_v2_item_by_id: Option<AddItemPayload>,
}

#[derive(Debug, Deserialize)]
struct AddItemPayload {
    item: Option<ProjectItem>,
}

#[derive(Debug, Deserialize)]
struct ProjectItem {
    id: String,
}

impl GitHubClient {
    /// Lists the projects an issue in `owner/repo` can be added to.
    ///
    /// Repository-level projects are tried first; when that query fails or
    /// returns nothing, organization-level projects for `owner` are used.
    /// Failures never propagate: an empty list means "no projects or no
    /// access", and each swallowed failure is logged.
    pub async fn list_projects(&self, owner: &str, repo: &str) -> Vec<Project> {
        match self.repository_projects(owner, repo).await {
            Ok(projects) if !projects.is_empty() => {
                debug!(count = projects.len(), "Found repository projects");
                return projects;
            }
            Ok(_) => debug!(owner, repo, "No repository projects, trying organization"),
            Err(e) => warn!(
                error = %e,
                owner,
                repo,
                "Repository project lookup failed, trying organization"
            ),
        }

        match self.organization_projects(owner).await {
            Ok(projects) => {
                debug!(count = projects.len(), "Found organization projects");
                projects
            }
            Err(e) => {
                warn!(error = %e, owner, "Organization project lookup failed");
                Vec::new()
            }
        }
    }

    /// Projects v2 attached to the repository
    pub async fn repository_projects(&self, owner: &str, repo: &str) -> Result<Vec<Project>> {
        let variables = json!({
            "owner": owner,
            "name": repo,
            "first": PROJECT_PAGE_SIZE,
        });
        let data: RepositoryProjects = self
            .graphql_query(REPOSITORY_PROJECTS_QUERY, &variables)
            .await?;
        data.repository
            .map(|r| r.projects_v2.into_projects())
            .ok_or_else(|| {
                Error::MalformedResponse(format!("repository {owner}/{repo} not returned"))
            })
    }

    /// Projects v2 owned by the organization `login`
    pub async fn organization_projects(&self, login: &str) -> Result<Vec<Project>> {
        let variables = json!({
            "login": login,
            "first": PROJECT_PAGE_SIZE,
        });
        let data: OrganizationProjects = self
            .graphql_query(ORGANIZATION_PROJECTS_QUERY, &variables)
            .await?;
        data.organization
            .map(|o| o.projects_v2.into_projects())
            .ok_or_else(|| Error::MalformedResponse(format!("organization {login} not returned")))
    }

    /// Adds the issue identified by `issue_node_id` to the project.
    ///
    /// Every failure is reported as `ProjectLinkFailed`.
    pub async fn add_issue_to_project(&self, project_id: &str, issue_node_id: &str) -> Result<()> {
        let variables = json!({
            "projectId": project_id,
            "contentId": issue_node_id,
        });
        let data: AddItemData = self
            .graphql_query(ADD_ITEM_MUTATION, &variables)
            .await
            .map_err(|e| Error::ProjectLinkFailed(e.to_string()))?;

        let item = data
            .add_project_v2_item_by_id
            .and_then(|payload| payload.item)
            .ok_or_else(|| Error::ProjectLinkFailed("no project item returned".to_string()))?;
        info!(project_id, item_id = %item.id, "Issue added to project");
        Ok(())
    }
}
