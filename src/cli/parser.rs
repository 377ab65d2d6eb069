use clap::Parser;

use crate::selector::ProjectFlag;

/// Create a GitHub issue for the current repository and optionally link it to a project
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "loose-end")]
#[command(version, about)]
pub struct Cli {
    /// Issue title (prompted for when omitted)
    pub title: Option<String>,

    /// Issue description (prompted for when omitted)
    pub description: Option<String>,

    /// Project to link the issue to. Without a name, the first project is used
    #[arg(
        short = 'p',
        long = "project",
        value_name = "NAME",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub project: Option<String>,

    /// Print diagnostic logging to stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// The three-state project option
    pub fn project_flag(&self) -> ProjectFlag {
        ProjectFlag::from(self.project.clone())
    }
}

/// Parse command line arguments (including program name)
pub fn parse_args(args: &[String]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(args)
}
