//! HTTP server for the ARX registry.
//!
//! Realizes the wire contract from `arx-protocol` over HTTP: bearer-token
//! authentication, the registry service (identity allocation, visibility
//! enforcement, envelope lifecycle), and the REST routes.

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod service;

pub use auth::{AuthProvider, StaticTokenAuth};
pub use config::{ApiKey, ServerConfig, TlsConfig};
pub use error::{ServerError, ServerResult};
pub use router::{build_router, AppState};
pub use server::ArxServer;
pub use service::RegistryService;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arx_policy::PolicyEngine;
    use arx_protocol::{CreateResponse, ErrorBody, ErrorCode, ListResponse};
    use arx_store::InMemoryEnvelopeStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use tower::util::ServiceExt;

    use super::*;

    fn test_router() -> Router {
        let service = RegistryService::new(
            Arc::new(InMemoryEnvelopeStore::new()),
            PolicyEngine::default(),
            "http://registry.test",
        );
        let auth =
            StaticTokenAuth::from_pairs([("key-alice", "alice"), ("key-bob", "bob")]).unwrap();
        build_router(AppState {
            service: Arc::new(service),
            auth: Arc::new(auth),
        })
    }

    fn request(method: Method, uri: &str, key: Option<&str>, body: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(key) = key {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {key}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create_survey(router: &Router, key: &str, visibility: &str) -> CreateResponse {
        let body = format!(
            r#"{{"object_type":"survey","payload":[123,125],"description":"s","visibility":"{visibility}"}}"#
        );
        let response = router
            .clone()
            .oneshot(request(Method::POST, "/v1/objects", Some(key), Some(&body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    #[tokio::test]
    async fn health_endpoint_is_open() {
        let response = test_router()
            .oneshot(request(Method::GET, "/v1/health", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unauthenticated_request_rejected_first() {
        let response = test_router()
            .oneshot(request(Method::GET, "/v1/objects", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: ErrorBody = body_json(response).await;
        assert_eq!(body.code, ErrorCode::Unauthenticated);
    }

    #[tokio::test]
    async fn unknown_key_rejected() {
        let response = test_router()
            .oneshot(request(Method::GET, "/v1/objects", Some("key-mallory"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_body_without_credential_is_unauthenticated() {
        // Authentication outranks body parsing: an anonymous request is
        // rejected 401 even when its body would not deserialize.
        let response = test_router()
            .oneshot(request(
                Method::POST,
                "/v1/objects",
                None,
                Some("{not json"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: ErrorBody = body_json(response).await;
        assert_eq!(body.code, ErrorCode::Unauthenticated);
    }

    #[tokio::test]
    async fn malformed_body_with_credential_is_validation_error() {
        let response = test_router()
            .oneshot(request(
                Method::POST,
                "/v1/objects",
                Some("key-alice"),
                Some("{not json"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn create_and_get_roundtrip() {
        let router = test_router();
        let created = create_survey(&router, "key-alice", "unlisted").await;
        assert_eq!(created.version, 1);
        assert!(created.url.starts_with("http://registry.test/v1/objects/"));

        // Any id holder can read an unlisted object.
        let response = router
            .clone()
            .oneshot(request(
                Method::GET,
                &format!("/v1/objects/{}", created.identifier),
                Some("key-bob"),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unlisted_objects_hidden_from_other_listings() {
        let router = test_router();
        create_survey(&router, "key-alice", "unlisted").await;

        let response = router
            .clone()
            .oneshot(request(Method::GET, "/v1/objects", Some("key-bob"), None))
            .await
            .unwrap();
        let listed: ListResponse = body_json(response).await;
        assert!(listed.objects.is_empty());
    }

    #[tokio::test]
    async fn private_get_by_other_principal_is_not_found() {
        let router = test_router();
        let created = create_survey(&router, "key-alice", "private").await;

        let response = router
            .clone()
            .oneshot(request(
                Method::GET,
                &format!("/v1/objects/{}", created.identifier),
                Some("key-bob"),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: ErrorBody = body_json(response).await;
        assert_eq!(body.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn patch_by_non_owner_is_forbidden() {
        let router = test_router();
        let created = create_survey(&router, "key-alice", "public").await;

        let response = router
            .clone()
            .oneshot(request(
                Method::PATCH,
                &format!("/v1/objects/{}", created.identifier),
                Some("key-bob"),
                Some(r#"{"description":{"set":"hijacked"}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn delete_is_idempotent_over_http() {
        let router = test_router();
        let created = create_survey(&router, "key-alice", "unlisted").await;
        let uri = format!("/v1/objects/{}", created.identifier);

        for _ in 0..2 {
            let response = router
                .clone()
                .oneshot(request(Method::DELETE, &uri, Some("key-alice"), None))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        // Never-allocated identifier is not found.
        let response = router
            .clone()
            .oneshot(request(
                Method::DELETE,
                &format!("/v1/objects/{}", arx_types::ArtifactId::mint()),
                Some("key-alice"),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn stale_expected_version_conflicts() {
        let router = test_router();
        let created = create_survey(&router, "key-alice", "unlisted").await;
        let uri = format!("/v1/objects/{}", created.identifier);

        let response = router
            .clone()
            .oneshot(request(
                Method::PATCH,
                &uri,
                Some("key-alice"),
                Some(r#"{"description":{"set":"first"}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .clone()
            .oneshot(request(
                Method::PATCH,
                &uri,
                Some("key-alice"),
                Some(r#"{"description":{"set":"second"},"expected_version":1}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn malformed_identifier_is_validation_error() {
        let response = test_router()
            .oneshot(request(
                Method::GET,
                "/v1/objects/not-a-uuid",
                Some("key-alice"),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn grants_flow_over_http() {
        let router = test_router();
        let created = create_survey(&router, "key-alice", "private").await;
        let base = format!("/v1/objects/{}", created.identifier);

        let response = router
            .clone()
            .oneshot(request(
                Method::POST,
                &format!("{base}/grants"),
                Some("key-alice"),
                Some(r#"{"principal":"bob"}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .clone()
            .oneshot(request(Method::GET, &base, Some("key-bob"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .clone()
            .oneshot(request(
                Method::DELETE,
                &format!("{base}/grants/bob"),
                Some("key-alice"),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .clone()
            .oneshot(request(Method::GET, &base, Some("key-bob"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
