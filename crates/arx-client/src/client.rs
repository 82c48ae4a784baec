use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use arx_adapter::ObjectAdapter;
use arx_protocol::{
    CreateRequest, CreateResponse, GrantRequest, ListQuery, ObjectResponse, PatchRequest,
};
use arx_store::EnvelopeSummary;
use arx_types::{ArtifactId, FieldUpdate, PrincipalId, Visibility};

use crate::error::{ClientError, ClientResult};
use crate::transport::RegistryTransport;

/// Client configuration. Constructed explicitly and passed in — there is
/// no process-wide default client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Deadline applied to every operation. Expiry surfaces as
    /// [`ClientError::Timeout`]; the client never retries on its own.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// The registry client: the operation surface callers use.
///
/// Translates typed objects into envelope operations through an
/// [`ObjectAdapter`] and dispatches them over the transport. The principal
/// is implicit in the transport's credential.
pub struct RegistryClient {
    transport: Arc<dyn RegistryTransport>,
    config: ClientConfig,
}

impl RegistryClient {
    pub fn new(transport: Arc<dyn RegistryTransport>, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// Upload a new object. The caller becomes owner; visibility defaults
    /// to unlisted when `None`.
    pub async fn create<A: ObjectAdapter>(
        &self,
        adapter: &A,
        object: &A::Object,
        description: Option<String>,
        visibility: Option<Visibility>,
    ) -> ClientResult<CreateResponse> {
        let payload = adapter
            .serialize(object)
            .map_err(|e| ClientError::Validation(e.to_string()))?;
        let request = CreateRequest {
            object_type: adapter.type_tag(),
            payload,
            description,
            visibility,
        };
        let created = self.bounded(self.transport.create(request)).await?;
        tracing::debug!(id = %created.identifier, object_type = %created.object_type, "object created");
        Ok(created)
    }

    /// Fetch an object and decode it with `adapter`.
    ///
    /// The envelope's type tag must match the adapter; a mismatch or a
    /// payload the adapter cannot read is a [`ClientError::Decode`].
    pub async fn get<A: ObjectAdapter>(
        &self,
        adapter: &A,
        id: &ArtifactId,
    ) -> ClientResult<A::Object> {
        let envelope = self.get_envelope(id).await?;
        if envelope.object_type != adapter.type_tag() {
            return Err(ClientError::Decode(arx_adapter::AdapterError::TypeMismatch {
                expected: adapter.type_tag(),
                actual: envelope.object_type,
            }));
        }
        Ok(adapter.deserialize(&envelope.payload)?)
    }

    /// Fetch the raw envelope, payload included but undecoded.
    pub async fn get_envelope(&self, id: &ArtifactId) -> ClientResult<ObjectResponse> {
        self.bounded(self.transport.get(id)).await
    }

    /// Apply a partial update. Omitted cells keep their prior values; an
    /// all-`Keep` request is a no-op that still succeeds.
    pub async fn patch(&self, id: &ArtifactId, request: PatchRequest) -> ClientResult<()> {
        self.bounded(self.transport.patch(id, request)).await?;
        Ok(())
    }

    /// Replace the stored payload with a re-serialized `object`.
    pub async fn patch_value<A: ObjectAdapter>(
        &self,
        adapter: &A,
        id: &ArtifactId,
        object: &A::Object,
    ) -> ClientResult<()> {
        let payload = adapter
            .serialize(object)
            .map_err(|e| ClientError::Validation(e.to_string()))?;
        self.patch(
            id,
            PatchRequest {
                payload: FieldUpdate::Set(payload),
                ..PatchRequest::default()
            },
        )
        .await
    }

    /// Delete an object. Idempotent for previously valid identifiers.
    pub async fn delete(&self, id: &ArtifactId) -> ClientResult<()> {
        self.bounded(self.transport.delete(id)).await?;
        Ok(())
    }

    /// List the summaries visible to this principal.
    pub async fn list(&self, query: ListQuery) -> ClientResult<Vec<EnvelopeSummary>> {
        let response = self.bounded(self.transport.list(query)).await?;
        Ok(response.objects)
    }

    /// Grant another principal access to an owned object.
    pub async fn share(&self, id: &ArtifactId, principal: PrincipalId) -> ClientResult<()> {
        self.bounded(self.transport.share(id, GrantRequest { principal }))
            .await?;
        Ok(())
    }

    /// Revoke a previously issued grant.
    pub async fn unshare(&self, id: &ArtifactId, principal: &PrincipalId) -> ClientResult<()> {
        self.bounded(self.transport.unshare(id, principal)).await?;
        Ok(())
    }

    async fn bounded<T>(&self, fut: impl Future<Output = ClientResult<T>>) -> ClientResult<T> {
        tokio::time::timeout(self.config.timeout, fut)
            .await
            .map_err(|_| ClientError::Timeout(self.config.timeout))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arx_adapter::{AgentConfig, Notebook, SurveyDef};
    use arx_policy::PolicyEngine;
    use arx_protocol::Credentials;
    use arx_server::{RegistryService, StaticTokenAuth};
    use arx_store::InMemoryEnvelopeStore;
    use arx_types::ObjectType;
    use async_trait::async_trait;

    use crate::transport::InProcessTransport;

    struct Harness {
        service: Arc<RegistryService>,
        auth: Arc<StaticTokenAuth>,
    }

    impl Harness {
        fn new() -> Self {
            let service = RegistryService::new(
                Arc::new(InMemoryEnvelopeStore::new()),
                PolicyEngine::default(),
                "http://registry.test",
            );
            let auth = StaticTokenAuth::from_pairs([
                ("key-alice", "alice"),
                ("key-bob", "bob"),
            ])
            .unwrap();
            Self {
                service: Arc::new(service),
                auth: Arc::new(auth),
            }
        }

        fn client(&self, key: &str) -> RegistryClient {
            let transport = InProcessTransport::new(
                Arc::clone(&self.service),
                self.auth.clone(),
                Credentials::Bearer(key.into()),
            );
            RegistryClient::new(Arc::new(transport), ClientConfig::default())
        }
    }

    fn sample_survey() -> SurveyDef {
        SurveyDef {
            name: "commute".into(),
            questions: vec![],
        }
    }

    fn bob() -> PrincipalId {
        PrincipalId::new("bob").unwrap()
    }

    // -----------------------------------------------------------------------
    // Round-trips and defaults
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn create_get_roundtrips_equivalent_object() {
        let harness = Harness::new();
        let client = harness.client("key-alice");
        let adapter = SurveyDef::adapter();

        let created = client
            .create(&adapter, &sample_survey(), Some("commute".into()), None)
            .await
            .unwrap();
        let fetched = client.get(&adapter, &created.identifier).await.unwrap();
        assert_eq!(fetched, sample_survey());
    }

    #[tokio::test]
    async fn create_defaults_to_unlisted() {
        let harness = Harness::new();
        let client = harness.client("key-alice");
        let created = client
            .create(&SurveyDef::adapter(), &sample_survey(), None, None)
            .await
            .unwrap();
        assert_eq!(created.visibility, Visibility::Unlisted);
        assert_eq!(created.version, 1);
    }

    #[tokio::test]
    async fn mismatched_adapter_is_decode_error() {
        let harness = Harness::new();
        let client = harness.client("key-alice");
        let created = client
            .create(&SurveyDef::adapter(), &sample_survey(), None, None)
            .await
            .unwrap();

        let err = client
            .get(&Notebook::adapter(), &created.identifier)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Decode(arx_adapter::AdapterError::TypeMismatch {
                expected: ObjectType::Notebook,
                actual: ObjectType::Survey,
            })
        ));
    }

    // -----------------------------------------------------------------------
    // Patch semantics
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn patch_description_only_leaves_payload_and_visibility() {
        let harness = Harness::new();
        let client = harness.client("key-alice");
        let adapter = SurveyDef::adapter();
        let created = client
            .create(&adapter, &sample_survey(), Some("original".into()), None)
            .await
            .unwrap();

        client
            .patch(
                &created.identifier,
                PatchRequest {
                    description: FieldUpdate::Set("renamed".into()),
                    ..PatchRequest::default()
                },
            )
            .await
            .unwrap();

        let envelope = client.get_envelope(&created.identifier).await.unwrap();
        assert_eq!(envelope.description.as_deref(), Some("renamed"));
        assert_eq!(envelope.visibility, Visibility::Unlisted);
        assert_eq!(
            adapter.deserialize(&envelope.payload).unwrap(),
            sample_survey()
        );
    }

    #[tokio::test]
    async fn version_advances_on_patch_never_decreases() {
        let harness = Harness::new();
        let client = harness.client("key-alice");
        let adapter = SurveyDef::adapter();
        let created = client
            .create(&adapter, &sample_survey(), None, None)
            .await
            .unwrap();

        let mut last_version = created.version;
        for i in 0..3 {
            client
                .patch(
                    &created.identifier,
                    PatchRequest {
                        description: FieldUpdate::Set(format!("rev {i}")),
                        ..PatchRequest::default()
                    },
                )
                .await
                .unwrap();
            let envelope = client.get_envelope(&created.identifier).await.unwrap();
            assert!(envelope.version > last_version);
            last_version = envelope.version;
        }

        // A no-op patch succeeds and leaves the version alone.
        client
            .patch(&created.identifier, PatchRequest::default())
            .await
            .unwrap();
        let envelope = client.get_envelope(&created.identifier).await.unwrap();
        assert_eq!(envelope.version, last_version);
    }

    #[tokio::test]
    async fn patch_value_reserializes_through_adapter() {
        let harness = Harness::new();
        let client = harness.client("key-alice");
        let adapter = SurveyDef::adapter();
        let created = client
            .create(&adapter, &sample_survey(), None, None)
            .await
            .unwrap();

        let mut revised = sample_survey();
        revised.name = "commute-v2".into();
        client
            .patch_value(&adapter, &created.identifier, &revised)
            .await
            .unwrap();

        let fetched = client.get(&adapter, &created.identifier).await.unwrap();
        assert_eq!(fetched.name, "commute-v2");
    }

    #[tokio::test]
    async fn stale_expected_version_is_conflict() {
        let harness = Harness::new();
        let client = harness.client("key-alice");
        let created = client
            .create(&SurveyDef::adapter(), &sample_survey(), None, None)
            .await
            .unwrap();

        client
            .patch(
                &created.identifier,
                PatchRequest {
                    description: FieldUpdate::Set("first".into()),
                    ..PatchRequest::default()
                },
            )
            .await
            .unwrap();

        let err = client
            .patch(
                &created.identifier,
                PatchRequest {
                    description: FieldUpdate::Set("second".into()),
                    expected_version: Some(1),
                    ..PatchRequest::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Conflict(_)));
    }

    // -----------------------------------------------------------------------
    // Delete semantics
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn delete_twice_succeeds_then_get_fails() {
        let harness = Harness::new();
        let client = harness.client("key-alice");
        let adapter = SurveyDef::adapter();
        let created = client
            .create(&adapter, &sample_survey(), None, None)
            .await
            .unwrap();

        client.delete(&created.identifier).await.unwrap();
        client.delete(&created.identifier).await.unwrap();

        let err = client.get(&adapter, &created.identifier).await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_never_allocated_is_not_found() {
        let harness = Harness::new();
        let client = harness.client("key-alice");
        let err = client.delete(&ArtifactId::mint()).await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }

    // -----------------------------------------------------------------------
    // Visibility across principals
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn unlisted_readable_by_id_holder_but_unlisted_in_listing() {
        let harness = Harness::new();
        let alice = harness.client("key-alice");
        let bob_client = harness.client("key-bob");
        let adapter = SurveyDef::adapter();

        let created = alice
            .create(&adapter, &sample_survey(), None, None)
            .await
            .unwrap();

        // Read by identifier succeeds for any principal holding it.
        assert!(bob_client.get(&adapter, &created.identifier).await.is_ok());
        // Listing by a non-owner omits it.
        let listed = bob_client.list(ListQuery::default()).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn public_turned_private_locks_out_other_principal() {
        let harness = Harness::new();
        let alice = harness.client("key-alice");
        let bob_client = harness.client("key-bob");
        let adapter = AgentConfig::adapter();
        let agent = AgentConfig {
            traits: Default::default(),
            instruction: None,
        };

        let created = alice
            .create(&adapter, &agent, Some("x".into()), Some(Visibility::Public))
            .await
            .unwrap();
        assert!(bob_client.get(&adapter, &created.identifier).await.is_ok());

        alice
            .patch(
                &created.identifier,
                PatchRequest {
                    visibility: FieldUpdate::Set(Visibility::Private),
                    ..PatchRequest::default()
                },
            )
            .await
            .unwrap();

        // Masked: the non-owner cannot even confirm existence.
        let err = bob_client
            .get(&adapter, &created.identifier)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }

    #[tokio::test]
    async fn share_then_unshare_controls_private_access() {
        let harness = Harness::new();
        let alice = harness.client("key-alice");
        let bob_client = harness.client("key-bob");
        let adapter = SurveyDef::adapter();

        let created = alice
            .create(&adapter, &sample_survey(), None, Some(Visibility::Private))
            .await
            .unwrap();

        alice.share(&created.identifier, bob()).await.unwrap();
        assert!(bob_client.get(&adapter, &created.identifier).await.is_ok());

        alice.unshare(&created.identifier, &bob()).await.unwrap();
        assert!(bob_client.get(&adapter, &created.identifier).await.is_err());
    }

    #[tokio::test]
    async fn bad_credential_is_unauthenticated() {
        let harness = Harness::new();
        let client = harness.client("key-mallory");
        let err = client.list(ListQuery::default()).await.unwrap_err();
        assert!(matches!(err, ClientError::Unauthenticated(_)));
    }

    // -----------------------------------------------------------------------
    // Timeout
    // -----------------------------------------------------------------------

    struct HangingTransport;

    #[async_trait]
    impl RegistryTransport for HangingTransport {
        async fn create(&self, _: CreateRequest) -> ClientResult<CreateResponse> {
            std::future::pending().await
        }
        async fn get(&self, _: &ArtifactId) -> ClientResult<ObjectResponse> {
            std::future::pending().await
        }
        async fn patch(
            &self,
            _: &ArtifactId,
            _: PatchRequest,
        ) -> ClientResult<arx_protocol::StatusResponse> {
            std::future::pending().await
        }
        async fn delete(&self, _: &ArtifactId) -> ClientResult<arx_protocol::StatusResponse> {
            std::future::pending().await
        }
        async fn list(&self, _: ListQuery) -> ClientResult<arx_protocol::ListResponse> {
            std::future::pending().await
        }
        async fn share(
            &self,
            _: &ArtifactId,
            _: GrantRequest,
        ) -> ClientResult<arx_protocol::StatusResponse> {
            std::future::pending().await
        }
        async fn unshare(
            &self,
            _: &ArtifactId,
            _: &PrincipalId,
        ) -> ClientResult<arx_protocol::StatusResponse> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn expired_deadline_surfaces_as_timeout() {
        let client = RegistryClient::new(
            Arc::new(HangingTransport),
            ClientConfig {
                timeout: Duration::from_millis(50),
            },
        );
        let err = client.get_envelope(&ArtifactId::mint()).await.unwrap_err();
        assert!(matches!(err, ClientError::Timeout(_)));
    }
}
