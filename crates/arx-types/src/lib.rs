//! Foundation types for the ARX registry.
//!
//! This crate provides the identity, visibility, and update-cell types used
//! throughout the ARX system. Every other ARX crate depends on `arx-types`.
//!
//! # Key Types
//!
//! - [`ArtifactId`] — Opaque, globally unique identifier minted once per object
//! - [`PrincipalId`] — The authenticated actor issuing a request
//! - [`ObjectType`] — Enumerated tag for the artifact kinds the registry stores
//! - [`Visibility`] — Access tier controlling read/list exposure
//! - [`FieldUpdate`] — Partial-update cell distinguishing "absent" from "set"

pub mod error;
pub mod field;
pub mod id;
pub mod object_type;
pub mod principal;
pub mod visibility;

pub use error::TypeError;
pub use field::FieldUpdate;
pub use id::ArtifactId;
pub use object_type::ObjectType;
pub use principal::PrincipalId;
pub use visibility::Visibility;
