use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Json;

use arx_protocol::{
    CreateRequest, CreateResponse, Credentials, GrantRequest, HealthResponse, ListQuery,
    ListResponse, ObjectResponse, PatchRequest, StatusResponse,
};
use arx_types::{ArtifactId, PrincipalId};

use crate::error::{ServerError, ServerResult};
use crate::router::AppState;

/// Health probe. The only handler that skips authentication.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::current())
}

pub async fn create_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> ServerResult<(StatusCode, Json<CreateResponse>)> {
    let principal = authenticate(&state, &headers).await?;
    let request: CreateRequest = parse_body(&body)?;
    let response = state.service.create(&principal, request)?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ServerResult<Json<ObjectResponse>> {
    let principal = authenticate(&state, &headers).await?;
    let id = parse_id(&id)?;
    Ok(Json(state.service.get(&principal, &id)?))
}

pub async fn patch_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: String,
) -> ServerResult<Json<StatusResponse>> {
    let principal = authenticate(&state, &headers).await?;
    let id = parse_id(&id)?;
    let request: PatchRequest = parse_body(&body)?;
    Ok(Json(state.service.patch(&principal, &id, request)?))
}

pub async fn delete_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ServerResult<Json<StatusResponse>> {
    let principal = authenticate(&state, &headers).await?;
    let id = parse_id(&id)?;
    Ok(Json(state.service.delete(&principal, &id)?))
}

pub async fn list_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> ServerResult<Json<ListResponse>> {
    let principal = authenticate(&state, &headers).await?;
    Ok(Json(state.service.list(&principal, query)?))
}

pub async fn share_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: String,
) -> ServerResult<Json<StatusResponse>> {
    let principal = authenticate(&state, &headers).await?;
    let id = parse_id(&id)?;
    let request: GrantRequest = parse_body(&body)?;
    Ok(Json(state.service.share(&principal, &id, request.principal)?))
}

pub async fn unshare_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, grantee)): Path<(String, String)>,
) -> ServerResult<Json<StatusResponse>> {
    let principal = authenticate(&state, &headers).await?;
    let id = parse_id(&id)?;
    let grantee =
        PrincipalId::new(grantee).map_err(|e| ServerError::Validation(e.to_string()))?;
    Ok(Json(state.service.unshare(&principal, &id, &grantee)?))
}

/// Resolve the request credential to a principal. Runs before anything
/// else in every authenticated handler.
async fn authenticate(state: &AppState, headers: &HeaderMap) -> ServerResult<PrincipalId> {
    let header_value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let credentials = Credentials::from_header(header_value);
    state.auth.authenticate(&credentials).await
}

fn parse_id(raw: &str) -> ServerResult<ArtifactId> {
    ArtifactId::parse(raw).map_err(|e| ServerError::Validation(e.to_string()))
}

/// Deserialize a request body. Bodies are taken as raw text so that
/// authentication always runs before any byte of the body is interpreted;
/// a body that is not valid JSON for the expected shape is a validation
/// error.
fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> ServerResult<T> {
    serde_json::from_str(body).map_err(|e| ServerError::Validation(e.to_string()))
}
