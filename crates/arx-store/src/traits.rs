use arx_types::ArtifactId;

use crate::envelope::{DeleteOutcome, Envelope, EnvelopeUpdate};
use crate::error::StoreResult;

/// The envelope store contract.
///
/// All implementations must satisfy these invariants:
/// - One identifier maps to at most one live envelope; identifiers are
///   never reused after deletion (tombstones persist for the store's
///   lifetime).
/// - `update` is atomic per envelope: concurrent updates to the same
///   identifier are applied in a serial order, and a partially applied
///   update is never observable.
/// - Once `remove` acknowledges a deletion, no subsequent `fetch` returns
///   the old envelope.
/// - The store never interprets payloads and never enforces visibility;
///   access control is the policy engine's concern.
pub trait EnvelopeStore: Send + Sync {
    /// Fetch a live envelope by identifier.
    ///
    /// Returns `Ok(None)` when the identifier resolves to no live envelope
    /// (never allocated or deleted). Returns `Err` on backend failure.
    fn fetch(&self, id: &ArtifactId) -> StoreResult<Option<Envelope>>;

    /// Insert a freshly created envelope.
    ///
    /// Fails with `AlreadyExists` if the identifier is live or tombstoned.
    fn insert(&self, envelope: Envelope) -> StoreResult<()>;

    /// Apply a partial update to one envelope atomically.
    ///
    /// When `expected_version` is supplied the update is rejected with
    /// `VersionConflict` unless it matches the live version. When it is
    /// absent, semantics are last-writer-wins in the store's serial order.
    ///
    /// An update with no set cell succeeds without advancing the version.
    /// Returns the envelope as stored after the update.
    fn update(
        &self,
        id: &ArtifactId,
        update: EnvelopeUpdate,
        expected_version: Option<u64>,
    ) -> StoreResult<Envelope>;

    /// Grant `principal` explicit access to the envelope. Idempotent;
    /// advances the version only when the grant set actually grows.
    fn grant(&self, id: &ArtifactId, principal: arx_types::PrincipalId) -> StoreResult<Envelope>;

    /// Revoke an explicit grant. Idempotent; advances the version only
    /// when the grant set actually shrinks.
    fn revoke(&self, id: &ArtifactId, principal: &arx_types::PrincipalId)
        -> StoreResult<Envelope>;

    /// Remove a live envelope and tombstone its identifier.
    ///
    /// Idempotent from the caller's perspective: see [`DeleteOutcome`].
    fn remove(&self, id: &ArtifactId) -> StoreResult<DeleteOutcome>;

    /// Returns `true` if the identifier was ever allocated (live or
    /// tombstoned). Used by allocation to guarantee non-reuse.
    fn is_allocated(&self, id: &ArtifactId) -> StoreResult<bool>;

    /// Every live envelope, unfiltered.
    ///
    /// Visibility filtering and payload stripping are the caller's
    /// responsibility; this method is not part of any wire surface.
    fn all(&self) -> StoreResult<Vec<Envelope>>;

    /// Mint an identifier guaranteed unallocated in this store.
    ///
    /// Collisions are negligible for random 128-bit identifiers; the loop
    /// is the bookkeeping that makes allocation unique across the
    /// registry's lifetime regardless.
    fn allocate(&self) -> StoreResult<ArtifactId> {
        loop {
            let id = ArtifactId::mint();
            if !self.is_allocated(&id)? {
                return Ok(id);
            }
        }
    }
}
