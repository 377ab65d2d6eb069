//! Decides which project, if any, the new issue is linked to.

use std::io::Write;

use tracing::debug;

use crate::error::{Error, Result};
use crate::github::Project;
use crate::output;
use crate::prompt::Prompter;
use crate::remote::RemoteRef;

const LINK_PROMPT: &str = "Would you like to link this issue to a project?";
const MENU_PROMPT: &str = "Select a project number (or 'n' to skip)";

/// The `-p/--project` option
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectFlag {
    /// Option absent: ask interactively
    Unset,
    /// Option given without a name: take the first project
    AutoFirst,
    /// Option given with a name: case-insensitive exact match
    Named(String),
}

impl From<Option<String>> for ProjectFlag {
    fn from(value: Option<String>) -> Self {
        match value {
            None => ProjectFlag::Unset,
            Some(name) if name.trim().is_empty() => ProjectFlag::AutoFirst,
            Some(name) => ProjectFlag::Named(name.trim().to_string()),
        }
    }
}

/// One answer typed at the numbered project menu
#[derive(Debug, PartialEq, Eq)]
pub enum MenuChoice {
    /// Zero-based index into the project list
    Index(usize),
    Skip,
    Invalid,
}

/// Interprets a 1-indexed menu answer for a list of `len` projects.
pub fn parse_menu_choice(input: &str, len: usize) -> MenuChoice {
    let input = input.trim();
    if input.eq_ignore_ascii_case("n") {
        return MenuChoice::Skip;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => MenuChoice::Index(n - 1),
        _ => MenuChoice::Invalid,
    }
}

/// Returns the first project whose name matches `name`, ignoring case.
pub fn find_project_by_name<'a>(projects: &'a [Project], name: &str) -> Option<&'a Project> {
    let wanted = name.to_lowercase();
    projects.iter().find(|p| p.name.to_lowercase() == wanted)
}

/// Picks the project to link according to the flag and the available projects.
///
/// A named project that does not exist is the only fatal outcome.
pub fn select_project(
    flag: &ProjectFlag,
    projects: &[Project],
    remote: &RemoteRef,
    prompter: &mut dyn Prompter,
    out: &mut Option<&mut dyn Write>,
) -> Result<Option<Project>> {
    match flag {
        ProjectFlag::Named(name) => match find_project_by_name(projects, name) {
            Some(project) => {
                debug!(project = %project.name, "Selected project by name");
                Ok(Some(project.clone()))
            }
            None => Err(Error::ProjectNotFound {
                name: name.clone(),
                available: available_names(projects),
            }),
        },
        ProjectFlag::AutoFirst => match projects.first() {
            Some(project) => {
                output::println(
                    &format!("📋 Auto-selected project: {}", project.name),
                    out,
                )?;
                Ok(Some(project.clone()))
            }
            None => {
                output::eprintln(
                    &format!(
                        "❌ No projects found for {}. The issue will not be linked.",
                        remote.full_name()
                    ),
                    out,
                )?;
                Ok(None)
            }
        },
        ProjectFlag::Unset => {
            if projects.is_empty() {
                output::println(
                    &format!(
                        "ℹ️  No projects found for {}. The issue will not be linked.",
                        remote.full_name()
                    ),
                    out,
                )?;
                return Ok(None);
            }
            if !prompter.confirm(LINK_PROMPT, Some(true))? {
                return Ok(None);
            }
            if let [only] = projects {
                output::println(&format!("📋 Using project: {}", only.name), out)?;
                return Ok(Some(only.clone()));
            }
            choose_from_menu(projects, prompter, out)
        }
    }
}

fn choose_from_menu(
    projects: &[Project],
    prompter: &mut dyn Prompter,
    out: &mut Option<&mut dyn Write>,
) -> Result<Option<Project>> {
    output::println("Available projects:", out)?;
    for (i, project) in projects.iter().enumerate() {
        output::println(
            &format!("  {}. {} (#{})", i + 1, project.name, project.number),
            out,
        )?;
    }

    loop {
        let answer = prompter.input(MENU_PROMPT)?;
        match parse_menu_choice(&answer, projects.len()) {
            MenuChoice::Index(i) => return Ok(Some(projects[i].clone())),
            MenuChoice::Skip => return Ok(None),
            MenuChoice::Invalid => output::eprintln(
                &format!(
                    "Invalid choice '{}'. Enter a number between 1 and {} or 'n'.",
                    answer.trim(),
                    projects.len()
                ),
                out,
            )?,
        }
    }
}

fn available_names(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "none".to_string();
    }
    projects
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
