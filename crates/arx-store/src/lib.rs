//! Envelope storage for the ARX registry.
//!
//! The envelope is the unit of storage and transfer: a versioned, typed,
//! visibility-tagged wrapper around an opaque serialized payload. This crate
//! defines the envelope itself, the [`EnvelopeStore`] contract every backend
//! must satisfy, and an in-memory backend for tests and embedding.
//!
//! # Design Rules
//!
//! 1. One identifier maps to exactly one envelope at any point in time.
//! 2. Identifiers are never reused: deleted identifiers stay tombstoned.
//! 3. Updates are atomic per envelope and serialized by the store; a partial
//!    update is never observable.
//! 4. `version` only advances, and only on updates that set at least one
//!    field.
//! 5. The store never interprets payloads — they are opaque bytes.
//! 6. All backend errors are propagated, never silently ignored.

pub mod envelope;
pub mod error;
pub mod memory;
pub mod traits;

pub use envelope::{DeleteOutcome, Envelope, EnvelopeSummary, EnvelopeUpdate};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryEnvelopeStore;
pub use traits::EnvelopeStore;
