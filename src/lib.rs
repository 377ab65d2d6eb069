//! Create a GitHub issue from the current git repository and optionally add
//! it to a GitHub Projects (v2) board.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod output;
pub mod prompt;
pub mod remote;
pub mod run;
pub mod selector;

pub use error::{Error, Result};
