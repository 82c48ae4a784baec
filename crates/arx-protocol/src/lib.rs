//! Wire contract for the ARX registry.
//!
//! Defines the JSON request/response bodies, error codes, endpoint paths,
//! and credential shape shared by the registry server and every client.
//! The contract is transport-agnostic JSON; the `arx-server` crate realizes
//! it over HTTP.

pub mod auth;
pub mod endpoint;
pub mod error;
pub mod message;

pub use auth::Credentials;
pub use endpoint::{endpoints, HealthResponse};
pub use error::{ErrorBody, ErrorCode};
pub use message::{
    CreateRequest, CreateResponse, GrantRequest, ListQuery, ListResponse, ObjectResponse,
    PatchRequest, Status, StatusResponse, PROTOCOL_VERSION,
};
