//! Error types for configuration and prompt enhancement

use thiserror::Error;

use crate::service::Transport;

/// Errors raised by a single enhancement transport
#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("missing credential: {0} environment variable is not set")]
    MissingCredential(&'static str),
    #[error("HTTP request via {transport} failed: {source}")]
    Http {
        transport: Transport,
        #[source]
        source: reqwest::Error,
    },
    #[error("{transport} transport: {message}")]
    Unauthorized {
        transport: Transport,
        message: String,
    },
    #[error("HTTP status {status} from {transport} transport: {message}")]
    HttpStatus {
        transport: Transport,
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("{transport} transport returned empty content")]
    EmptyResponse { transport: Transport },
    #[error("unable to parse response from {transport} transport: {message}")]
    ResponseParse {
        transport: Transport,
        message: String,
    },
}

impl EnhanceError {
    pub fn http(transport: Transport, source: reqwest::Error) -> Self {
        Self::Http { transport, source }
    }

    pub fn status(transport: Transport, status: reqwest::StatusCode, message: String) -> Self {
        Self::HttpStatus {
            transport,
            status,
            message,
        }
    }

    pub fn response(transport: Transport, message: impl Into<String>) -> Self {
        Self::ResponseParse {
            transport,
            message: message.into(),
        }
    }

    /// True when the request never left the process
    pub fn is_local(&self) -> bool {
        matches!(self, Self::MissingCredential(_))
    }
}

/// Errors raised while building [`crate::config::Config`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
    #[error("{0} cannot be empty")]
    Empty(&'static str),
}
