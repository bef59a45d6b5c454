use thiserror::Error;

use crate::{config::LoadError, infra::error::InfraError};

/// Failures outside the request/toast path: startup, rendering, output, and
/// the final verdict of a command whose requests were rejected.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header `{name}`: {reason}")]
    InvalidHeader { name: &'static str, reason: String },
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
    #[error("failed to write output {path}: {source}")]
    Output {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("request rejected: {0}")]
    Rejected(String),
}

impl ConsoleError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
