use std::sync::Arc;

use arx_protocol::{
    CreateRequest, CreateResponse, Credentials, GrantRequest, ListQuery, ListResponse,
    ObjectResponse, PatchRequest, StatusResponse,
};
use arx_server::{AuthProvider, RegistryService, ServerError};
use arx_types::{ArtifactId, PrincipalId};
use async_trait::async_trait;

use crate::error::{ClientError, ClientResult};

/// Transport seam between the client and a registry.
///
/// One method per wire operation; implementations carry the credential and
/// the connection. The client layers deadlines and adapter work on top, so
/// transports stay a thin request/response mapping.
#[async_trait]
pub trait RegistryTransport: Send + Sync {
    async fn create(&self, request: CreateRequest) -> ClientResult<CreateResponse>;
    async fn get(&self, id: &ArtifactId) -> ClientResult<ObjectResponse>;
    async fn patch(&self, id: &ArtifactId, request: PatchRequest) -> ClientResult<StatusResponse>;
    async fn delete(&self, id: &ArtifactId) -> ClientResult<StatusResponse>;
    async fn list(&self, query: ListQuery) -> ClientResult<ListResponse>;
    async fn share(&self, id: &ArtifactId, request: GrantRequest) -> ClientResult<StatusResponse>;
    async fn unshare(
        &self,
        id: &ArtifactId,
        principal: &PrincipalId,
    ) -> ClientResult<StatusResponse>;
}

/// Transport bound directly to an in-process [`RegistryService`].
///
/// Used for tests and for embedding a registry inside another process. The
/// credential is authenticated on every call, exactly as a remote
/// realization would.
pub struct InProcessTransport {
    service: Arc<RegistryService>,
    auth: Arc<dyn AuthProvider>,
    credentials: Credentials,
}

impl InProcessTransport {
    pub fn new(
        service: Arc<RegistryService>,
        auth: Arc<dyn AuthProvider>,
        credentials: Credentials,
    ) -> Self {
        Self {
            service,
            auth,
            credentials,
        }
    }

    async fn principal(&self) -> ClientResult<PrincipalId> {
        self.auth
            .authenticate(&self.credentials)
            .await
            .map_err(convert)
    }
}

fn convert(err: ServerError) -> ClientError {
    ClientError::from(err.body())
}

#[async_trait]
impl RegistryTransport for InProcessTransport {
    async fn create(&self, request: CreateRequest) -> ClientResult<CreateResponse> {
        let principal = self.principal().await?;
        self.service.create(&principal, request).map_err(convert)
    }

    async fn get(&self, id: &ArtifactId) -> ClientResult<ObjectResponse> {
        let principal = self.principal().await?;
        self.service.get(&principal, id).map_err(convert)
    }

    async fn patch(&self, id: &ArtifactId, request: PatchRequest) -> ClientResult<StatusResponse> {
        let principal = self.principal().await?;
        self.service.patch(&principal, id, request).map_err(convert)
    }

    async fn delete(&self, id: &ArtifactId) -> ClientResult<StatusResponse> {
        let principal = self.principal().await?;
        self.service.delete(&principal, id).map_err(convert)
    }

    async fn list(&self, query: ListQuery) -> ClientResult<ListResponse> {
        let principal = self.principal().await?;
        self.service.list(&principal, query).map_err(convert)
    }

    async fn share(&self, id: &ArtifactId, request: GrantRequest) -> ClientResult<StatusResponse> {
        let principal = self.principal().await?;
        self.service
            .share(&principal, id, request.principal)
            .map_err(convert)
    }

    async fn unshare(
        &self,
        id: &ArtifactId,
        principal_to_revoke: &PrincipalId,
    ) -> ClientResult<StatusResponse> {
        let principal = self.principal().await?;
        self.service
            .unshare(&principal, id, principal_to_revoke)
            .map_err(convert)
    }
}
