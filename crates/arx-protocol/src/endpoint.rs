use arx_types::{ArtifactId, PrincipalId};

/// HTTP endpoint paths for the registry contract.
pub mod endpoints {
    pub const OBJECTS: &str = "/v1/objects";
    pub const HEALTH: &str = "/v1/health";

    /// Path addressing one object.
    pub fn object(id: &super::ArtifactId) -> String {
        format!("{OBJECTS}/{id}")
    }

    /// Path addressing one object's grant collection.
    pub fn grants(id: &super::ArtifactId) -> String {
        format!("{OBJECTS}/{id}/grants")
    }

    /// Path addressing one grant.
    pub fn grant(id: &super::ArtifactId, principal: &super::PrincipalId) -> String {
        format!("{OBJECTS}/{id}/grants/{principal}")
    }
}

/// Body of the health probe, the one endpoint that skips authentication.
/// Reports the crate version and the wire contract revision so a client
/// can detect a contract mismatch before sending real traffic.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub protocol_version: u32,
}

impl HealthResponse {
    pub fn current() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            protocol_version: super::message::PROTOCOL_VERSION,
        }
    }
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self::current()
    }
}
