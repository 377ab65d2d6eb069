//! # GitHub HTTP Client
//!
//! One client per run, shared by the REST issue call and the GraphQL project
//! calls. Every call is awaited in turn; nothing is retried.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;

use crate::auth::Credentials;
use crate::config::Settings;
use crate::error::Result;

const USER_AGENT: &str = "loose-end";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Represents a GitHub API client
pub struct GitHubClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_url: String,
    pub(crate) graphql_url: String,
    token: String,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(credentials: &Credentials, settings: &Settings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(GitHubClient {
            client,
            api_url: settings.api_url.clone(),
            graphql_url: settings.graphql_url.clone(),
            token: credentials.token().to_string(),
        })
    }

    /// Starts an authenticated request with the headers GitHub expects.
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
    }
}

/// Client pointed at a mock server, authenticated as `test-token`.
#[cfg(test)]
pub(crate) fn test_client(uri: &str) -> GitHubClient {
    let settings = Settings {
        api_url: uri.to_string(),
        graphql_url: format!("{uri}/graphql"),
        remote: "origin".to_string(),
    };
    GitHubClient::new(&Credentials::new("test-token"), &settings)
        .expect("client should build")
}

/// Error body returned by the REST API
#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    message: String,
}

/// Extracts GitHub's `message` from an error body, falling back to the raw text.
pub(crate) fn api_error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(err) => err.message,
        Err(_) if body.trim().is_empty() => format!("HTTP {status}"),
        Err(_) => format!("HTTP {status}: {}", body.trim()),
    }
}
