use thiserror::Error;

/// Result type for loose-end operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while creating an issue
#[derive(Error, Debug)]
pub enum Error {
    /// The working directory is not inside a git work tree
    #[error("This is not a Git repository.")]
    NotAGitRepo,

    /// The configured remote has no URL
    #[error("No remote URL found. Make sure the repo has the '{0}' remote set.")]
    NoRemote(String),

    /// The remote URL does not point at GitHub
    #[error("Unsupported remote URL format: {0}")]
    UnsupportedRemoteFormat(String),

    /// A project was requested by name but the owner has none with that name
    #[error("Project '{name}' not found. Available projects: {available}")]
    ProjectNotFound { name: String, available: String },

    /// Issue creation was rejected or never reached GitHub
    #[error("Failed to create issue: {message}{}", format_hint(.hint))]
    IssueCreationFailed {
        message: String,
        hint: Option<String>,
    },

    /// The issue exists but could not be added to the project
    #[error("Failed to add issue to project: {0}")]
    ProjectLinkFailed(String),

    /// GitHub answered with a body that does not match the expected shape
    #[error("Malformed response from GitHub: {0}")]
    MalformedResponse(String),

    /// Non-success HTTP status
    #[error("GitHub API error ({status}): {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    /// GraphQL returned an `errors` array
    #[error("GraphQL errors: {0}")]
    GraphQl(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0:#}")]
    Config(anyhow::Error),
}

fn format_hint(hint: &Option<String>) -> String {
    hint.as_deref()
        .map(|h| format!("\n💡 {h}"))
        .unwrap_or_default()
}
