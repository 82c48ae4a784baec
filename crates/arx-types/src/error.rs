use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid artifact identifier: {0}")]
    InvalidIdentifier(String),

    #[error("invalid principal: {0}")]
    InvalidPrincipal(String),

    #[error("unknown object type: {0}")]
    UnknownObjectType(String),

    #[error("invalid visibility literal: {0} (expected public, private, or unlisted)")]
    InvalidVisibility(String),
}
