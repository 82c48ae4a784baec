use std::collections::HashMap;

use arx_protocol::Credentials;
use arx_types::PrincipalId;
use async_trait::async_trait;

use crate::error::{ServerError, ServerResult};

/// Resolves a request credential to the principal it identifies.
///
/// Authentication runs before any other processing; a failure here is
/// always fatal to the request.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<PrincipalId>;
}

/// Token-table authentication: a fixed map from API keys to principals.
///
/// The key table comes from server configuration. Anonymous requests and
/// unknown keys are rejected.
#[derive(Debug)]
pub struct StaticTokenAuth {
    tokens: HashMap<String, PrincipalId>,
}

impl StaticTokenAuth {
    pub fn new(tokens: HashMap<String, PrincipalId>) -> Self {
        Self { tokens }
    }

    /// Build from `(key, principal)` pairs; convenient in tests and config
    /// loading.
    pub fn from_pairs<I, K>(pairs: I) -> ServerResult<Self>
    where
        I: IntoIterator<Item = (K, K)>,
        K: Into<String>,
    {
        let mut tokens = HashMap::new();
        for (key, principal) in pairs {
            let principal = PrincipalId::new(principal.into())
                .map_err(|e| ServerError::Config(e.to_string()))?;
            tokens.insert(key.into(), principal);
        }
        Ok(Self::new(tokens))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl AuthProvider for StaticTokenAuth {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<PrincipalId> {
        match credentials {
            Credentials::Anonymous => Err(ServerError::Unauthenticated(
                "missing credential".into(),
            )),
            Credentials::Bearer(key) => self
                .tokens
                .get(key)
                .cloned()
                .ok_or_else(|| ServerError::Unauthenticated("unknown API key".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> StaticTokenAuth {
        StaticTokenAuth::from_pairs([("key-alice", "alice"), ("key-bob", "bob")]).unwrap()
    }

    #[tokio::test]
    async fn known_key_resolves_principal() {
        let principal = auth()
            .authenticate(&Credentials::Bearer("key-alice".into()))
            .await
            .unwrap();
        assert_eq!(principal.as_str(), "alice");
    }

    #[tokio::test]
    async fn unknown_key_rejected() {
        let err = auth()
            .authenticate(&Credentials::Bearer("key-mallory".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Unauthenticated(_)));
    }

    #[tokio::test]
    async fn anonymous_rejected() {
        let err = auth()
            .authenticate(&Credentials::Anonymous)
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Unauthenticated(_)));
    }

    #[test]
    fn invalid_principal_in_pairs_is_config_error() {
        let err = StaticTokenAuth::from_pairs([("key", "")]).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }
}
