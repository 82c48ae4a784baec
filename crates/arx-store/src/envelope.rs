use std::collections::BTreeSet;

use arx_types::{ArtifactId, FieldUpdate, ObjectType, PrincipalId, Visibility};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The persisted unit: a versioned, typed, visibility-tagged wrapper around
/// an opaque serialized payload.
///
/// Identity, type tag, and owner are fixed at creation; payload,
/// description, visibility, and grants mutate in place through
/// [`EnvelopeUpdate`]s, each of which advances `version`. The payload is
/// opaque to the store — only the adapter matching `object_type` can
/// interpret it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Immutable identity, minted at creation.
    pub id: ArtifactId,
    /// Immutable type tag naming the adapter that can read the payload.
    pub object_type: ObjectType,
    /// Opaque serialized object bytes.
    pub payload: Vec<u8>,
    /// Optional human-readable description.
    pub description: Option<String>,
    /// Access tier; defaults to unlisted for new envelopes.
    pub visibility: Visibility,
    /// Monotonic version marker, starting at 1.
    pub version: u64,
    /// Immutable owner principal.
    pub owner: PrincipalId,
    /// Principals explicitly granted access to a private envelope.
    pub grants: BTreeSet<PrincipalId>,
    /// Creation instant; immutable.
    pub created_at: DateTime<Utc>,
    /// Instant of the last version-advancing update.
    pub updated_at: DateTime<Utc>,
}

impl Envelope {
    /// Build a fresh version-1 envelope owned by `owner`.
    pub fn new(
        id: ArtifactId,
        object_type: ObjectType,
        payload: Vec<u8>,
        description: Option<String>,
        visibility: Visibility,
        owner: PrincipalId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            object_type,
            payload,
            description,
            visibility,
            version: 1,
            owner,
            grants: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns `true` if `principal` owns this envelope.
    pub fn is_owner(&self, principal: &PrincipalId) -> bool {
        &self.owner == principal
    }

    /// Returns `true` if `principal` holds an explicit grant.
    pub fn is_granted(&self, principal: &PrincipalId) -> bool {
        self.grants.contains(principal)
    }

    /// The payload-free listing row for this envelope.
    pub fn summary(&self) -> EnvelopeSummary {
        EnvelopeSummary {
            id: self.id,
            object_type: self.object_type,
            description: self.description.clone(),
            visibility: self.visibility,
            version: self.version,
            owner: self.owner.clone(),
            updated_at: self.updated_at,
        }
    }
}

/// Listing row: everything about an envelope except its payload and grants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeSummary {
    pub id: ArtifactId,
    pub object_type: ObjectType,
    pub description: Option<String>,
    pub visibility: Visibility,
    pub version: u64,
    pub owner: PrincipalId,
    pub updated_at: DateTime<Utc>,
}

/// A partial update to one envelope.
///
/// Each field is an independent [`FieldUpdate`] cell, so any subset may be
/// supplied; `Keep` cells leave the prior value untouched. An update whose
/// cells are all `Keep` is a no-op that succeeds without advancing the
/// version.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeUpdate {
    #[serde(default)]
    pub description: FieldUpdate<String>,
    #[serde(default)]
    pub visibility: FieldUpdate<Visibility>,
    #[serde(default)]
    pub payload: FieldUpdate<Vec<u8>>,
}

impl EnvelopeUpdate {
    /// An update that changes nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns `true` if no cell carries a value.
    pub fn is_noop(&self) -> bool {
        !self.description.is_set() && !self.visibility.is_set() && !self.payload.is_set()
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = FieldUpdate::Set(description.into());
        self
    }

    /// Set the visibility.
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = FieldUpdate::Set(visibility);
        self
    }

    /// Set the payload.
    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = FieldUpdate::Set(payload);
        self
    }

    /// Apply the update to an envelope in place.
    ///
    /// Returns `true` if any field was written; the caller is responsible
    /// for advancing the version and timestamp when it was.
    pub fn apply_to(self, envelope: &mut Envelope) -> bool {
        let mut changed = false;
        if let Some(description) = self.description.into_set() {
            envelope.description = Some(description);
            changed = true;
        }
        changed |= self.visibility.apply_to(&mut envelope.visibility);
        changed |= self.payload.apply_to(&mut envelope.payload);
        changed
    }
}

/// The outcome of a delete.
///
/// Deletion is idempotent: both `Deleted` and `AlreadyDeleted` report
/// success to callers. Only an identifier that was never allocated yields
/// `NeverAllocated`, which surfaces as not-found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// A live envelope was removed and its identifier tombstoned.
    Deleted,
    /// The identifier was already tombstoned; nothing changed.
    AlreadyDeleted,
    /// The identifier was never allocated by this registry.
    NeverAllocated,
}

impl DeleteOutcome {
    /// Returns `true` for the outcomes a caller sees as success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Deleted | Self::AlreadyDeleted)
    }
}
