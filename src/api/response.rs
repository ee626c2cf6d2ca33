//! Response status handling and body decoding.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::error::{ApiError, Result};

/// Success statuses of a read.
pub const GET_OK: &[StatusCode] = &[StatusCode::OK];
/// Success statuses of a create.
pub const POST_CREATED: &[StatusCode] = &[StatusCode::CREATED];
/// Success statuses of an update or delete.
pub const PUT_OR_DELETE_OK: &[StatusCode] = &[StatusCode::OK, StatusCode::NO_CONTENT];

/// A received HTTP response with its body fully read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// The entity a single-entity operation targets, reported on 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Missing<'a> {
    pub kind: &'a str,
    pub id: u64,
    /// `None` for reads, or the verb of a write ("update", "delete").
    pub action: Option<&'a str>,
}

impl Missing<'_> {
    fn into_error(self) -> ApiError {
        ApiError::NotFound {
            kind: self.kind.to_string(),
            id: self.id,
            action: self.action.map(str::to_string),
        }
    }
}

/// The `{"errors": [...]}` body Redmine sends on validation failures.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    errors: Vec<String>,
}

/// Map the response status to success or an error.
///
/// In order: 404 with a `missing` target becomes `NotFound`; a status
/// outside `success` becomes `Rejected` if the body carries error messages,
/// otherwise `Status`.
pub fn check_status(
    response: &HttpResponse,
    success: &[StatusCode],
    missing: Option<Missing<'_>>,
) -> Result<()> {
    if response.status == StatusCode::NOT_FOUND {
        if let Some(missing) = missing {
            return Err(missing.into_error());
        }
    }

    if success.contains(&response.status) {
        return Ok(());
    }

    Err(error_from_response(response))
}

/// Check the status, then decode the success body as `T`.
pub fn decode<T: DeserializeOwned>(
    response: HttpResponse,
    success: &[StatusCode],
    missing: Option<Missing<'_>>,
) -> Result<T> {
    check_status(&response, success, missing)?;
    serde_json::from_str(&response.body).map_err(ApiError::Decode)
}

fn error_from_response(response: &HttpResponse) -> ApiError {
    debug!(status = %response.status, body = %response.body, "Error response");

    match serde_json::from_str::<ErrorEnvelope>(&response.body) {
        Ok(envelope) if !envelope.errors.is_empty() => ApiError::Rejected {
            status: response.status,
            messages: envelope.errors,
        },
        _ => ApiError::Status {
            status: response.status,
        },
    }
}
