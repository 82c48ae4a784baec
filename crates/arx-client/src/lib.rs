//! Registry client for ARX.
//!
//! Wraps the wire contract in a typed operation surface: callers hand an
//! [`ObjectAdapter`](arx_adapter::ObjectAdapter) and a domain value to
//! [`RegistryClient`] and get envelopes, identifiers, and decoded objects
//! back. The transport is a seam; [`InProcessTransport`] binds the client
//! directly to a registry service for tests and embedded use.
//!
//! # Key Types
//!
//! - [`RegistryClient`] — the operation surface: create, get, patch,
//!   delete, list, share, unshare
//! - [`ClientConfig`] — per-client settings, chiefly the deadline
//! - [`RegistryTransport`] — async seam a concrete connection implements
//! - [`ClientError`] — the client-side error taxonomy

pub mod client;
pub mod error;
pub mod transport;

pub use client::{ClientConfig, RegistryClient};
pub use error::{ClientError, ClientResult};
pub use transport::{InProcessTransport, RegistryTransport};
