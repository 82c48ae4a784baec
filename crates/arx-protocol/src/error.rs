use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire error codes.
///
/// The codes are the taxonomy clients branch on; the accompanying message
/// is advisory text, never part of the contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Missing or invalid credential. Checked before any other processing.
    Unauthenticated,
    /// Identifier never allocated — or access to a private envelope denied
    /// under existence masking.
    NotFound,
    /// Valid identifier, insufficient rights for the operation.
    Forbidden,
    /// The request violates a documented constraint (bad payload, invalid
    /// literal, unserializable object).
    Validation,
    /// Optimistic concurrency check failed.
    Conflict,
    /// Unclassified server-side failure.
    Internal,
}

impl ErrorCode {
    /// The snake_case wire literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::Validation => "validation",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }

    /// The HTTP status the server maps this code to.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Unauthenticated => 401,
            Self::NotFound => 404,
            Self::Forbidden => 403,
            Self::Validation => 422,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The error body every failed request carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{code}: {message}")]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
