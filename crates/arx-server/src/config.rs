use std::net::SocketAddr;
use std::path::PathBuf;

use arx_policy::PolicyConfig;
use serde::{Deserialize, Serialize};

use crate::auth::StaticTokenAuth;
use crate::error::{ServerError, ServerResult};

/// Registry server configuration, loadable from TOML.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Public base URL used to build the `url` field of create receipts.
    pub public_base_url: String,
    /// API key table mapping credentials to principals.
    #[serde(default)]
    pub api_keys: Vec<ApiKey>,
    #[serde(default)]
    pub policy: PolicyConfig,
    pub tls: Option<TlsConfig>,
}

/// One API key entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiKey {
    pub key: String,
    pub principal: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TlsConfig {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8420".parse().expect("valid literal"),
            public_base_url: "http://127.0.0.1:8420".into(),
            api_keys: Vec::new(),
            policy: PolicyConfig::default(),
            tls: None,
        }
    }
}

impl ServerConfig {
    /// Parse from TOML text.
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Build the token-table authenticator from the configured keys.
    pub fn auth_provider(&self) -> ServerResult<StaticTokenAuth> {
        StaticTokenAuth::from_pairs(
            self.api_keys
                .iter()
                .map(|k| (k.key.clone(), k.principal.clone())),
        )
    }
}
