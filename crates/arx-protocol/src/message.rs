use arx_store::{Envelope, EnvelopeSummary};
use arx_types::{ArtifactId, FieldUpdate, ObjectType, PrincipalId, Visibility};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version marker for the wire contract itself.
pub const PROTOCOL_VERSION: u32 = 1;

/// Create a new object. `POST /v1/objects`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRequest {
    pub object_type: ObjectType,
    pub payload: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Defaults to `unlisted` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

/// The receipt a successful create returns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResponse {
    pub identifier: ArtifactId,
    pub object_type: ObjectType,
    /// Canonical address of the object under the server's public base URL.
    pub url: String,
    pub version: u64,
    pub visibility: Visibility,
    pub description: Option<String>,
}

/// The full envelope a get returns. Grants are deliberately absent: the
/// grant list is owner-facing state, not part of the read surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectResponse {
    pub identifier: ArtifactId,
    pub object_type: ObjectType,
    pub payload: Vec<u8>,
    pub description: Option<String>,
    pub visibility: Visibility,
    pub version: u64,
    pub owner: PrincipalId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Envelope> for ObjectResponse {
    fn from(envelope: &Envelope) -> Self {
        Self {
            identifier: envelope.id,
            object_type: envelope.object_type,
            payload: envelope.payload.clone(),
            description: envelope.description.clone(),
            visibility: envelope.visibility,
            version: envelope.version,
            owner: envelope.owner.clone(),
            created_at: envelope.created_at,
            updated_at: envelope.updated_at,
        }
    }
}

/// Partially update one object. `PATCH /v1/objects/:id`.
///
/// Any subset of cells may be set; omitted cells keep their prior values.
/// `expected_version`, when supplied, makes the patch an optimistic
/// compare-and-swap rejected with `conflict` on mismatch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchRequest {
    #[serde(default)]
    pub description: FieldUpdate<String>,
    #[serde(default)]
    pub visibility: FieldUpdate<Visibility>,
    #[serde(default)]
    pub payload: FieldUpdate<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<u64>,
}

impl PatchRequest {
    /// Returns `true` if no cell carries a value.
    pub fn is_noop(&self) -> bool {
        !self.description.is_set() && !self.visibility.is_set() && !self.payload.is_set()
    }
}

/// Grant a principal access to a private object.
/// `POST /v1/objects/:id/grants`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantRequest {
    pub principal: PrincipalId,
}

/// Listing filter. `GET /v1/objects?object_type=&owner=`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<ObjectType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<PrincipalId>,
}

/// Listing response: summaries only, never payloads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    pub objects: Vec<EnvelopeSummary>,
}

/// Operation status literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failure,
}

/// The body mutating operations return. Delete and patch both answer with
/// `{"status": "success"}`; failures travel as [`crate::ErrorBody`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: Status,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: Status::Success,
        }
    }
}
