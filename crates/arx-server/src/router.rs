use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use arx_protocol::endpoints;

use crate::auth::AuthProvider;
use crate::handler;
use crate::service::RegistryService;

/// Shared handler state: the registry core and the authenticator.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RegistryService>,
    pub auth: Arc<dyn AuthProvider>,
}

/// Build the axum router realizing the wire contract.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::HEALTH, get(handler::health_handler))
        .route(
            endpoints::OBJECTS,
            post(handler::create_handler).get(handler::list_handler),
        )
        .route(
            "/v1/objects/:id",
            get(handler::get_handler)
                .patch(handler::patch_handler)
                .delete(handler::delete_handler),
        )
        .route("/v1/objects/:id/grants", post(handler::share_handler))
        .route(
            "/v1/objects/:id/grants/:principal",
            delete(handler::unshare_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
