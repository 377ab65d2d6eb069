//! GitHub GraphQL API support for Projects v2

use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use super::client::{GitHubClient, api_error_message};
use crate::error::{Error, Result};

/// GraphQL query response wrapper
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLError>>,
}

/// GraphQL error
#[derive(Debug, Deserialize)]
struct GraphQLError {
    message: String,
}

impl GitHubClient {
    /// Execute a GraphQL query or mutation and decode `data` as `T`.
    ///
    /// A body that does not match `T` is a `MalformedResponse`, and a non-empty
    /// `errors` array is a `GraphQl` error even when partial data came back.
    pub(crate) async fn graphql_query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: &serde_json::Value,
    ) -> Result<T> {
        let request_body = json!({
            "query": query,
            "variables": variables,
        });

        let response = self
            .request(Method::POST, &self.graphql_url)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Error::Api {
                status,
                message: api_error_message(status, &text),
            });
        }

        let graphql_response: GraphQLResponse<T> = serde_json::from_str(&text)
            .map_err(|e| Error::MalformedResponse(format!("GraphQL response: {e}")))?;

        if let Some(errors) = graphql_response.errors.filter(|e| !e.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            debug!(?messages, "GraphQL call returned errors");
            return Err(Error::GraphQl(messages.join(", ")));
        }

        graphql_response
            .data
            .ok_or_else(|| Error::MalformedResponse("GraphQL response has no data".to_string()))
    }
}
