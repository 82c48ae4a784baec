use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The authenticated actor issuing a request.
///
/// A `PrincipalId` is an opaque reference resolved from the credential
/// presented with every request. The registry never interprets it beyond
/// equality: ownership and grant checks compare principals, nothing else.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

impl PrincipalId {
    /// Create a principal from its opaque reference string.
    ///
    /// The reference must be non-empty and free of whitespace; it is what
    /// the authentication layer resolved a credential to, not the
    /// credential itself.
    pub fn new(reference: impl Into<String>) -> Result<Self, TypeError> {
        let reference = reference.into();
        if reference.is_empty() {
            return Err(TypeError::InvalidPrincipal("empty reference".into()));
        }
        if reference.chars().any(char::is_whitespace) {
            return Err(TypeError::InvalidPrincipal(format!(
                "reference contains whitespace: {reference:?}"
            )));
        }
        Ok(Self(reference))
    }

    /// The opaque reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrincipalId({})", self.0)
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
