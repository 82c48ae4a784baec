use std::sync::Arc;

use arx_policy::{Access, Denial, Operation, PolicyEngine};
use arx_protocol::{
    endpoints, CreateRequest, CreateResponse, ListQuery, ListResponse, ObjectResponse,
    PatchRequest, StatusResponse,
};
use arx_store::{Envelope, EnvelopeStore, EnvelopeUpdate};
use arx_types::{ArtifactId, PrincipalId};

use crate::error::{ServerError, ServerResult};

/// The registry's semantic core: identity allocation, visibility
/// enforcement, and envelope lifecycle, independent of HTTP.
///
/// Every handler delegates here; each operation is a single atomic
/// transition on one envelope. The service holds no per-request state, so
/// one instance serves all connections.
pub struct RegistryService {
    store: Arc<dyn EnvelopeStore>,
    policy: PolicyEngine,
    /// Public base URL used to build the `url` field of create receipts.
    base_url: String,
}

impl RegistryService {
    pub fn new(store: Arc<dyn EnvelopeStore>, policy: PolicyEngine, base_url: impl Into<String>) -> Self {
        Self {
            store,
            policy,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a new envelope owned by `principal`.
    ///
    /// Always succeeds for an authenticated principal; the identity
    /// allocator mints the identifier and visibility defaults to unlisted.
    pub fn create(
        &self,
        principal: &PrincipalId,
        request: CreateRequest,
    ) -> ServerResult<CreateResponse> {
        let id = self.store.allocate()?;
        let envelope = Envelope::new(
            id,
            request.object_type,
            request.payload,
            request.description,
            request.visibility.unwrap_or_default(),
            principal.clone(),
        );
        let response = CreateResponse {
            identifier: id,
            object_type: envelope.object_type,
            url: format!("{}{}", self.base_url, endpoints::object(&id)),
            version: envelope.version,
            visibility: envelope.visibility,
            description: envelope.description.clone(),
        };
        self.store.insert(envelope)?;
        tracing::info!(id = %id, owner = %principal, object_type = %request.object_type, "object created");
        Ok(response)
    }

    /// Fetch one envelope, enforcing read visibility.
    pub fn get(&self, principal: &PrincipalId, id: &ArtifactId) -> ServerResult<ObjectResponse> {
        let envelope = self.fetch_authorized(principal, id, Operation::Read)?;
        Ok(ObjectResponse::from(&envelope))
    }

    /// Apply a partial update; omitted fields keep their prior values.
    pub fn patch(
        &self,
        principal: &PrincipalId,
        id: &ArtifactId,
        request: PatchRequest,
    ) -> ServerResult<StatusResponse> {
        self.fetch_authorized(principal, id, Operation::Update)?;
        let update = EnvelopeUpdate {
            description: request.description,
            visibility: request.visibility,
            payload: request.payload,
        };
        self.store.update(id, update, request.expected_version)?;
        tracing::info!(id = %id, principal = %principal, "object patched");
        Ok(StatusResponse::success())
    }

    /// Delete an envelope. Idempotent: repeated deletes of a previously
    /// valid identifier report success; only a never-allocated identifier
    /// is not found.
    pub fn delete(
        &self,
        principal: &PrincipalId,
        id: &ArtifactId,
    ) -> ServerResult<StatusResponse> {
        if let Some(envelope) = self.store.fetch(id)? {
            self.check(principal, &envelope, Operation::Delete)?;
        }
        let outcome = self.store.remove(id)?;
        if !outcome.is_success() {
            return Err(ServerError::NotFound(id.to_string()));
        }
        tracing::info!(id = %id, principal = %principal, ?outcome, "object deleted");
        Ok(StatusResponse::success())
    }

    /// List the envelopes visible to `principal`, as payload-free
    /// summaries.
    pub fn list(&self, principal: &PrincipalId, query: ListQuery) -> ServerResult<ListResponse> {
        let objects = self
            .store
            .all()?
            .into_iter()
            .filter(|e| self.policy.visible_in_listing(e, principal))
            .filter(|e| query.object_type.map_or(true, |t| e.object_type == t))
            .filter(|e| {
                query
                    .owner
                    .as_ref()
                    .map_or(true, |owner| &e.owner == owner)
            })
            .map(|e| e.summary())
            .collect();
        Ok(ListResponse { objects })
    }

    /// Grant `grantee` explicit access. Owner only.
    pub fn share(
        &self,
        principal: &PrincipalId,
        id: &ArtifactId,
        grantee: PrincipalId,
    ) -> ServerResult<StatusResponse> {
        self.fetch_authorized(principal, id, Operation::Share)?;
        if &grantee == principal {
            return Err(ServerError::Validation(
                "cannot grant access to the owner".into(),
            ));
        }
        self.store.grant(id, grantee)?;
        Ok(StatusResponse::success())
    }

    /// Revoke an explicit grant. Owner only; revoking an absent grant
    /// succeeds.
    pub fn unshare(
        &self,
        principal: &PrincipalId,
        id: &ArtifactId,
        grantee: &PrincipalId,
    ) -> ServerResult<StatusResponse> {
        self.fetch_authorized(principal, id, Operation::Share)?;
        self.store.revoke(id, grantee)?;
        Ok(StatusResponse::success())
    }

    fn fetch_authorized(
        &self,
        principal: &PrincipalId,
        id: &ArtifactId,
        operation: Operation,
    ) -> ServerResult<Envelope> {
        let envelope = self
            .store
            .fetch(id)?
            .ok_or_else(|| ServerError::NotFound(id.to_string()))?;
        self.check(principal, &envelope, operation)?;
        Ok(envelope)
    }

    fn check(
        &self,
        principal: &PrincipalId,
        envelope: &Envelope,
        operation: Operation,
    ) -> ServerResult<()> {
        match self.policy.authorize(operation, envelope, principal) {
            Access::Allow => Ok(()),
            Access::Deny(Denial::Concealed) => {
                // Same shape as a never-allocated identifier.
                Err(ServerError::NotFound(envelope.id.to_string()))
            }
            Access::Deny(Denial::Forbidden { reason }) => Err(ServerError::Forbidden(reason)),
        }
    }
}
