//! Interactive prompts.
//!
//! The pipeline only talks to the [`Prompter`] trait so it can run against a
//! terminal or against a [`ScriptedPrompter`] replaying canned answers.

use std::collections::VecDeque;
use std::io;

use console::Style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password};

use crate::error::{Error, Result};

/// Source of answers for interactive questions.
pub trait Prompter {
    /// Ask for a required line of text. Empty answers are not accepted.
    fn input(&mut self, prompt: &str) -> Result<String>;
    /// Ask for a secret with the input masked.
    fn password(&mut self, prompt: &str) -> Result<String>;
    /// Ask a yes/no question. `None` forces an explicit answer.
    fn confirm(&mut self, prompt: &str, default: Option<bool>) -> Result<bool>;
}

/// Returns the dialoguer theme used for every terminal prompt.
pub fn loose_end_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_style: Style::new().cyan().bold(),
        active_item_prefix: Style::new().green().apply_to("❯ ".to_string()),
        active_item_style: Style::new().green(),
        ..ColorfulTheme::default()
    }
}

/// Prompter backed by the user's terminal.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        TerminalPrompter {
            theme: loose_end_theme(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str) -> Result<String> {
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact_text()?;
        Ok(answer.trim().to_string())
    }

    fn password(&mut self, prompt: &str) -> Result<String> {
        Ok(Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact()?)
    }

    fn confirm(&mut self, prompt: &str, default: Option<bool>) -> Result<bool> {
        let confirm = Confirm::with_theme(&self.theme).with_prompt(prompt);
        let confirm = match default {
            Some(value) => confirm.default(value),
            None => confirm,
        };
        Ok(confirm.interact()?)
    }
}

/// Prompter that replays a fixed list of answers in order.
///
/// Confirmations accept `y`/`yes`/`n`/`no`. Every prompt text is recorded in
/// [`ScriptedPrompter::asked`]. Running out of answers is an error.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Answers that were never consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, prompt: &str) -> Result<String> {
        self.asked.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no scripted answer for prompt '{prompt}'"),
            ))
        })
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn password(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn confirm(&mut self, prompt: &str, default: Option<bool>) -> Result<bool> {
        let answer = self.next(prompt)?;
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => Ok(true),
            "n" | "no" => Ok(false),
            "" if default.is_some() => Ok(default.unwrap_or_default()),
            other => Err(Error::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{other}' is not a yes/no answer"),
            ))),
        }
    }
}
