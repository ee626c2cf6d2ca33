//! API error types for the Redmine client.

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur when interacting with the Redmine API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid client configuration, detected before sending anything.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The server answered 404 for a single entity.
    #[error("{}", not_found_message(.kind, .id, .action))]
    NotFound {
        kind: String,
        id: u64,
        /// The write verb ("update", "delete"), or `None` for reads.
        action: Option<String>,
    },

    /// The server rejected the request with an `{"errors": [...]}` body.
    #[error("{}", join_messages(.messages))]
    Rejected {
        status: StatusCode,
        messages: Vec<String>,
    },

    /// The server returned an unexpected status without a usable error body.
    #[error("HTTP {status}")]
    Status { status: StatusCode },

    /// A page came back empty before the reported `total_count` was reached.
    #[error("incomplete listing of {kind}: got {collected} of {total_count} items")]
    IncompletePage {
        kind: String,
        collected: usize,
        total_count: u64,
    },

    /// Network or HTTP transport error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A successful response did not match the expected JSON shape.
    #[error("could not decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request payload could not be serialized.
    #[error("could not encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Another error, annotated with the operation that produced it.
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<ApiError>,
    },
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

fn not_found_message(kind: &str, id: &u64, action: &Option<String>) -> String {
    match action {
        Some(verb) => format!(
            "could not {} {} (id: {}) because it was not found",
            verb, kind, id
        ),
        None => format!("{} (id: {}) was not found", kind, id),
    }
}

fn join_messages(messages: &[String]) -> String {
    messages.join("\n")
}

impl ApiError {
    /// Wrap this error with a description of the failed operation.
    ///
    /// `NotFound` and `Decode` are returned unchanged: the former already
    /// names the entity, the latter is a contract violation surfaced as-is.
    pub fn context(self, context: impl Into<String>) -> Self {
        match self {
            ApiError::NotFound { .. } | ApiError::Decode(_) => self,
            other => ApiError::Context {
                context: context.into(),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, with all context layers removed.
    pub fn root(&self) -> &ApiError {
        match self {
            ApiError::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// Check whether the server reported the entity as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), ApiError::NotFound { .. })
    }

    /// The HTTP status behind this error, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self.root() {
            ApiError::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            ApiError::Rejected { status, .. } | ApiError::Status { status } => Some(*status),
            ApiError::Network(e) => e.status(),
            _ => None,
        }
    }
}

/// Attach operation context to a fallible result.
pub(crate) trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| e.context(f()))
    }
}
