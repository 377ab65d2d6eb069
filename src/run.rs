use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::auth;
use crate::cli::parser::Cli;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::git;
use crate::github::{GitHubClient, IssueRequest, IssueResult, Project};
use crate::output;
use crate::prompt::Prompter;
use crate::remote::{self, RemoteRef};
use crate::selector;

const TITLE_PROMPT: &str = "Issue Title";
const DESCRIPTION_PROMPT: &str = "Issue Description";
const CREATE_PROMPT: &str = "Create this issue?";

/// Process state a run depends on
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Directory the command was started in
    pub work_dir: PathBuf,
    /// Value of `GITHUB_TOKEN`, if set
    pub env_token: Option<String>,
}

impl RunContext {
    pub fn from_env() -> std::io::Result<Self> {
        Ok(RunContext {
            work_dir: std::env::current_dir()?,
            env_token: std::env::var(auth::TOKEN_ENV).ok(),
        })
    }
}

/// How a successful run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created {
        issue: IssueResult,
        project: Option<Project>,
        /// Set when the issue exists but linking it to `project` failed
        link_warning: Option<String>,
    },
    /// The user declined the final confirmation; nothing was created
    Cancelled,
}

/// Runs the whole create-and-link pipeline.
///
/// Every returned error is fatal. A failed project link is reported as a
/// warning and still yields `Outcome::Created`.
pub async fn run(
    cli: Cli,
    context: RunContext,
    prompter: &mut dyn Prompter,
    mut stdout_additional: Option<&mut dyn std::io::Write>,
) -> Result<Outcome> {
    if !git::is_git_repository(&context.work_dir) {
        return Err(Error::NotAGitRepo);
    }

    let root = git::repository_root(&context.work_dir).unwrap_or_else(|| context.work_dir.clone());
    let settings = Settings::load(&root).map_err(Error::Config)?;
    debug!(?settings, root = %root.display(), "Loaded settings");

    let remote_url = git::get_remote_url(&context.work_dir, &settings.remote);
    if remote_url.is_empty() {
        return Err(Error::NoRemote(settings.remote));
    }
    let remote = remote::parse_owner_repo(&remote_url)?;
    debug!(owner = %remote.owner, repo = %remote.repo, "Parsed remote");

    let credentials = auth::get_token(context.env_token.as_deref(), prompter)?;
    let client = GitHubClient::new(&credentials, &settings)?;

    let projects = client.list_projects(&remote.owner, &remote.repo).await;
    let project = selector::select_project(
        &cli.project_flag(),
        &projects,
        &remote,
        prompter,
        &mut stdout_additional,
    )?;

    let request = collect_issue(cli.title, cli.description, prompter)?;

    output::println(
        &render_summary(&request, &remote, project.as_ref()),
        &mut stdout_additional,
    )?;
    if !prompter.confirm(CREATE_PROMPT, None)? {
        output::println("Issue creation cancelled.", &mut stdout_additional)?;
        return Ok(Outcome::Cancelled);
    }

    let issue = client.create_issue(&remote, &request).await?;

    let mut link_warning = None;
    if let Some(project) = &project {
        match client.add_issue_to_project(&project.id, &issue.node_id).await {
            Ok(()) => output::println(
                &format!("🔗 Linked issue to project '{}'", project.name),
                &mut stdout_additional,
            )?,
            Err(e) => {
                warn!(error = %e, project = %project.name, "Project link failed");
                output::eprintln(
                    &format!(
                        "⚠️  Warning: the issue was created but could not be added to project '{}': {e}",
                        project.name
                    ),
                    &mut stdout_additional,
                )?;
                link_warning = Some(e.to_string());
            }
        }
    }

    output::println(
        &format!("✅ Issue created successfully! {}", issue.url),
        &mut stdout_additional,
    )?;
    info!(url = %issue.url, "Run complete");

    Ok(Outcome::Created {
        issue,
        project,
        link_warning,
    })
}

/// Uses the command-line title/description, prompting for whichever is missing.
fn collect_issue(
    title: Option<String>,
    description: Option<String>,
    prompter: &mut dyn Prompter,
) -> Result<IssueRequest> {
    let title = match title.filter(|t| !t.trim().is_empty()) {
        Some(title) => title,
        None => prompter.input(TITLE_PROMPT)?,
    };
    let body = match description.filter(|d| !d.trim().is_empty()) {
        Some(body) => body,
        None => prompter.input(DESCRIPTION_PROMPT)?,
    };
    Ok(IssueRequest { title, body })
}

/// Text shown before asking for the final confirmation.
pub fn render_summary(request: &IssueRequest, remote: &RemoteRef, project: Option<&Project>) -> String {
    let project = project.map_or("None", |p| p.name.as_str());
    format!(
        "\n📝 Issue summary\n  Title:       {}\n  Description: {}\n  Repository:  {}\n  Project:     {}\n",
        request.title,
        request.body,
        remote.full_name(),
        project
    )
}
