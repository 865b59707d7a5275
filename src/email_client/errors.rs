use serde::Deserialize;
use thiserror::Error;

use crate::email_client::request::TokenType;

/// Failures of a single request/response cycle.
///
/// Every variant keeps the underlying error as its source. Nothing is retried and HTTP
/// status codes never produce an error on their own.
#[derive(Debug, Error)]
pub enum EmailClientError {
    #[error("Invalid HTTP method `{method}`: {source}")]
    InvalidMethod {
        method: String,
        source: http::method::InvalidMethod,
    },
    #[error("Invalid request url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("Request path `{path}` has dot segments and would not be sent as given")]
    DotSegmentPath { path: String },
    #[error("Invalid {token_type} token: {source}")]
    InvalidToken {
        token_type: TokenType,
        source: http::header::InvalidHeaderValue,
    },
    #[error("Failed to serialize the request payload: {source}")]
    Serialization { source: serde_json::Error },
    #[error("Failed to send the request: {source}")]
    Transport { source: reqwest::Error },
    #[error("Failed to read the response body: {source}")]
    BodyRead { source: reqwest::Error },
    #[error("Failed to deserialize the response body: {source}")]
    Deserialization { source: serde_json::Error },
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// The error shape Postmark returns in a response body.
#[derive(Clone, Debug, Default, Deserialize, Error, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[error("{message}")]
pub struct ApiError {
    pub error_code: i64,
    pub message: String,
}

impl ApiError {
    pub fn message(&self) -> &str {
        &self.message
    }
}
