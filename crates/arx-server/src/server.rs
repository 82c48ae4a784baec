use std::sync::Arc;

use arx_policy::PolicyEngine;
use arx_store::InMemoryEnvelopeStore;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::router::{build_router, AppState};
use crate::service::RegistryService;

/// The ARX registry server.
pub struct ArxServer {
    config: ServerConfig,
    state: AppState,
}

impl ArxServer {
    /// Assemble a server over the in-memory backend, configured entirely
    /// from `config`.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let service = RegistryService::new(
            Arc::new(InMemoryEnvelopeStore::new()),
            PolicyEngine::new(config.policy.clone()),
            config.public_base_url.clone(),
        );
        let state = AppState {
            service: Arc::new(service),
            auth: Arc::new(config.auth_provider()?),
        };
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Install the process-wide tracing subscriber.
    pub fn init_tracing() {
        tracing_subscriber::fmt().with_target(false).init();
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("ARX registry listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| crate::error::ServerError::Internal(e.to_string()))
    }
}
