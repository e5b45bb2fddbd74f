//! Blocking GraphQL client for the members API

use super::query::{GraphqlResponse, MemberSource, QueryRequest};
use crate::error::FetchError;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

/// `Bearer <token>`, without doubling a prefix the token already carries
pub fn bearer_value(token: &str) -> String {
    let token = token.trim();
    let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();
    format!("Bearer {}", token)
}

/// Posts members queries to a single endpoint
pub struct GraphqlClient {
    url: String,
    client: Client,
}

impl GraphqlClient {
    pub fn new(url: &str, token: &str, timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let auth = HeaderValue::from_str(&bearer_value(token))
            .map_err(|e| FetchError::Transport(format!("invalid access token: {}", e)))?;
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

impl MemberSource for GraphqlClient {
    fn execute(&self, request: &QueryRequest) -> Result<GraphqlResponse, FetchError> {
        tracing::debug!(
            operation = request.operation.name(),
            first = request.first,
            after = ?request.after,
            "posting members query"
        );

        let response = self
            .client
            .post(&self.url)
            .json(&request.to_body())
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            });
        }

        response
            .json::<GraphqlResponse>()
            .map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_value_adds_prefix() {
        assert_eq!(bearer_value("abc123"), "Bearer abc123");
    }

    #[test]
    fn test_bearer_value_does_not_double_prefix() {
        assert_eq!(bearer_value("Bearer abc123"), "Bearer abc123");
        assert_eq!(bearer_value("  Bearer  abc123 "), "Bearer abc123");
    }

    #[test]
    fn test_client_rejects_unprintable_token() {
        let result = GraphqlClient::new("http://localhost:4000/graphql", "bad\ntoken", Duration::from_secs(5));
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }

    #[test]
    fn test_unreachable_endpoint_is_transport_error() {
        let client = GraphqlClient::new("http://127.0.0.1:9/graphql", "t", Duration::from_millis(500)).unwrap();
        let result = client.execute(&QueryRequest::list(20));
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }
}
