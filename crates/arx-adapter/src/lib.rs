//! Object adapters for the ARX registry.
//!
//! The registry treats every payload as opaque bytes; only the adapter
//! matching an envelope's `object_type` can interpret it. An adapter is a
//! capability set `{serialize, deserialize, type_tag}` implemented once per
//! artifact kind — adding a new kind requires a new adapter and nothing
//! else, and the registry never branches on concrete object kinds.
//!
//! [`JsonAdapter`] covers any serde-capable artifact type; the [`artifacts`]
//! module ships the built-in kinds with ready-made adapters.

pub mod adapter;
pub mod artifacts;
pub mod error;

pub use adapter::{JsonAdapter, ObjectAdapter};
pub use artifacts::{
    AgentConfig, CacheEntries, Notebook, QuestionDef, ResultSet, SurveyDef,
};
pub use error::{AdapterError, AdapterResult};
