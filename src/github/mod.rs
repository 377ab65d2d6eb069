//! GitHub REST and GraphQL calls used to create and link issues.

pub mod client;
pub mod graphql;
pub mod issues;
pub mod projects;

pub use client::GitHubClient;
pub use issues::{IssueRequest, IssueResult};
pub use projects::Project;
