//! Visibility policy engine for the ARX registry.
//!
//! Decides, for a given (envelope, requesting principal) pair, whether an
//! operation is permitted. The engine is the ONLY access-control path in
//! the registry — every read, mutation, deletion, grant change, and listing
//! row passes through it.
//!
//! # Rules
//!
//! | tier | read | update | delete |
//! |---|---|---|---|
//! | public | anyone | owner | owner |
//! | private | owner + granted | owner + granted | owner |
//! | unlisted | anyone holding the id | owner | owner |
//!
//! Create always succeeds for an authenticated principal, who becomes the
//! owner. Listing exposes public envelopes, the principal's own envelopes,
//! and private envelopes the principal is granted on — never unlisted
//! envelopes of other owners.
//!
//! # Existence masking
//!
//! A denied read of a private envelope is reported as *concealed*: callers
//! receive the same not-found shape as for an identifier that was never
//! allocated, so unauthorized probes cannot confirm existence. A denied
//! mutation of an envelope the principal could read is an ordinary
//! forbidden. The masking is configurable through [`PolicyConfig`] and on
//! by default.

pub mod engine;

pub use engine::{Access, Denial, Operation, PolicyConfig, PolicyEngine};
