use serde::{Deserialize, Serialize};

/// Credential presented with a request.
///
/// Every request to the registry carries an opaque API key as a bearer
/// token; only the health probe is exempt. The credential identifies the
/// principal — it is resolved server-side and never stored in envelopes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Credentials {
    Bearer(String),
    Anonymous,
}

impl Default for Credentials {
    fn default() -> Self {
        Self::Anonymous
    }
}

impl Credentials {
    /// Parse an `Authorization` header value, if one was sent.
    ///
    /// Anything other than a well-formed non-empty `Bearer <key>` value is
    /// treated as anonymous; the authentication layer rejects anonymous
    /// requests before any other processing.
    pub fn from_header(value: Option<&str>) -> Self {
        match value.and_then(|v| v.strip_prefix("Bearer ")) {
            Some(key) if !key.trim().is_empty() => Self::Bearer(key.trim().to_string()),
            _ => Self::Anonymous,
        }
    }

    /// Render as an `Authorization` header value, when authenticated.
    pub fn to_header(&self) -> Option<String> {
        match self {
            Self::Bearer(key) => Some(format!("Bearer {key}")),
            Self::Anonymous => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }
}
