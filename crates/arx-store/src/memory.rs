use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use arx_types::{ArtifactId, PrincipalId};
use chrono::Utc;

use crate::envelope::{DeleteOutcome, Envelope, EnvelopeUpdate};
use crate::error::{StoreError, StoreResult};
use crate::traits::EnvelopeStore;

#[derive(Default)]
struct Inner {
    live: HashMap<ArtifactId, Envelope>,
    /// Identifiers of deleted envelopes. Kept forever so identifiers are
    /// never reused and repeated deletes stay distinguishable from
    /// never-allocated identifiers.
    tombstones: HashSet<ArtifactId>,
}

/// In-memory, HashMap-based envelope store.
///
/// Intended for tests and embedding. All envelopes live behind a single
/// `RwLock`, which also serializes per-identifier updates: every mutation
/// takes the write lock, applies atomically, and releases. Envelopes are
/// cloned on read.
pub struct InMemoryEnvelopeStore {
    inner: RwLock<Inner>,
}

impl InMemoryEnvelopeStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Number of live envelopes.
    pub fn len(&self) -> usize {
        self.inner.read().expect("lock poisoned").live.len()
    }

    /// Returns `true` if no envelope is live.
    pub fn is_empty(&self) -> bool {
        self.inner.read().expect("lock poisoned").live.is_empty()
    }

    /// Number of tombstoned identifiers.
    pub fn tombstone_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").tombstones.len()
    }

    fn mutate<R>(
        &self,
        id: &ArtifactId,
        f: impl FnOnce(&mut Envelope) -> StoreResult<R>,
    ) -> StoreResult<R> {
        let mut inner = self.inner.write().expect("lock poisoned");
        let envelope = inner
            .live
            .get_mut(id)
            .ok_or(StoreError::NotFound(*id))?;
        f(envelope)
    }
}

impl Default for InMemoryEnvelopeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvelopeStore for InMemoryEnvelopeStore {
    fn fetch(&self, id: &ArtifactId) -> StoreResult<Option<Envelope>> {
        let inner = self.inner.read().expect("lock poisoned");
        Ok(inner.live.get(id).cloned())
    }

    fn insert(&self, envelope: Envelope) -> StoreResult<()> {
        let mut inner = self.inner.write().expect("lock poisoned");
        let id = envelope.id;
        if inner.live.contains_key(&id) || inner.tombstones.contains(&id) {
            return Err(StoreError::AlreadyExists(id));
        }
        inner.live.insert(id, envelope);
        Ok(())
    }

    fn update(
        &self,
        id: &ArtifactId,
        update: EnvelopeUpdate,
        expected_version: Option<u64>,
    ) -> StoreResult<Envelope> {
        self.mutate(id, |envelope| {
            if let Some(expected) = expected_version {
                if envelope.version != expected {
                    return Err(StoreError::VersionConflict {
                        id: *id,
                        expected,
                        actual: envelope.version,
                    });
                }
            }
            if update.apply_to(envelope) {
                envelope.version += 1;
                envelope.updated_at = Utc::now();
                tracing::debug!(id = %envelope.id, version = envelope.version, "envelope updated");
            }
            Ok(envelope.clone())
        })
    }

    fn grant(&self, id: &ArtifactId, principal: PrincipalId) -> StoreResult<Envelope> {
        self.mutate(id, |envelope| {
            if envelope.grants.insert(principal) {
                envelope.version += 1;
                envelope.updated_at = Utc::now();
            }
            Ok(envelope.clone())
        })
    }

    fn revoke(&self, id: &ArtifactId, principal: &PrincipalId) -> StoreResult<Envelope> {
        self.mutate(id, |envelope| {
            if envelope.grants.remove(principal) {
                envelope.version += 1;
                envelope.updated_at = Utc::now();
            }
            Ok(envelope.clone())
        })
    }

    fn remove(&self, id: &ArtifactId) -> StoreResult<DeleteOutcome> {
        let mut inner = self.inner.write().expect("lock poisoned");
        if inner.live.remove(id).is_some() {
            inner.tombstones.insert(*id);
            tracing::debug!(id = %id, "envelope deleted");
            return Ok(DeleteOutcome::Deleted);
        }
        if inner.tombstones.contains(id) {
            return Ok(DeleteOutcome::AlreadyDeleted);
        }
        Ok(DeleteOutcome::NeverAllocated)
    }

    fn is_allocated(&self, id: &ArtifactId) -> StoreResult<bool> {
        let inner = self.inner.read().expect("lock poisoned");
        Ok(inner.live.contains_key(id) || inner.tombstones.contains(id))
    }

    fn all(&self) -> StoreResult<Vec<Envelope>> {
        let inner = self.inner.read().expect("lock poisoned");
        let mut envelopes: Vec<Envelope> = inner.live.values().cloned().collect();
        envelopes.sort_by_key(|e| e.id);
        Ok(envelopes)
    }
}

impl std::fmt::Debug for InMemoryEnvelopeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryEnvelopeStore")
            .field("live", &self.len())
            .field("tombstones", &self.tombstone_count())
            .finish()
    }
}
