use std::time::Duration;

use arx_adapter::AdapterError;
use arx_protocol::{ErrorBody, ErrorCode};
use thiserror::Error;

/// Client-side error taxonomy.
///
/// Every operation returns either a well-formed success value or exactly
/// one of these; the client never retries or recovers silently. `Decode`
/// and `Timeout` are deliberately distinct from the wire errors so callers
/// can tell a bad payload or an expired deadline apart from a permission
/// problem.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing or invalid credential.
    #[error("authentication failed: {0}")]
    Unauthenticated(String),

    /// Identifier never allocated, or access concealed by policy.
    #[error("object not found: {0}")]
    NotFound(String),

    /// Valid identifier, insufficient rights.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The request violates a documented constraint, including objects the
    /// adapter cannot serialize.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Optimistic concurrency check failed.
    #[error("version conflict: {0}")]
    Conflict(String),

    /// Payload retrieved but incompatible with the adapter.
    #[error("decode failed: {0}")]
    Decode(#[from] AdapterError),

    /// No response within the configured deadline. Retrying is the
    /// caller's decision.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The transport failed below the protocol layer.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered with a code outside the client taxonomy.
    #[error("server error: {0}")]
    Remote(ErrorBody),
}

impl From<ErrorBody> for ClientError {
    fn from(body: ErrorBody) -> Self {
        match body.code {
            ErrorCode::Unauthenticated => Self::Unauthenticated(body.message),
            ErrorCode::NotFound => Self::NotFound(body.message),
            ErrorCode::Forbidden => Self::Forbidden(body.message),
            ErrorCode::Validation => Self::Validation(body.message),
            ErrorCode::Conflict => Self::Conflict(body.message),
            ErrorCode::Internal => Self::Remote(body),
        }
    }
}

/// Result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
