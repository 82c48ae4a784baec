use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;

/// Opaque, globally unique identifier for a registered artifact.
///
/// An `ArtifactId` is minted exactly once, when an object is first uploaded,
/// and addresses the same envelope for the envelope's entire lifetime. It is
/// a version-4 UUID rendered as the canonical hyphenated lowercase string,
/// so collision probability is negligible and the token carries no
/// information about the object it names.
///
/// Identifiers are never reused, even after the envelope is deleted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(Uuid);

impl ArtifactId {
    /// Mint a fresh identifier from cryptographically random material.
    pub fn mint() -> Self {
        Self(Uuid::new_v4())
    }

    /// The nil identifier (all zeros). Represents "no artifact".
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Returns `true` if this is the nil identifier.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Canonical hyphenated lowercase string form.
    pub fn canonical(&self) -> String {
        self.0
            .hyphenated()
            .encode_lower(&mut Uuid::encode_buffer())
            .to_string()
    }

    /// Short form (first 8 characters) for logs and debug output.
    pub fn short(&self) -> String {
        self.canonical()[..8].to_string()
    }

    /// Parse from the canonical string form.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| TypeError::InvalidIdentifier(format!("{s}: {e}")))
    }

    /// Create from raw UUID bytes. Use `mint()` for production code.
    pub fn from_raw(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl fmt::Debug for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArtifactId({})", self.short())
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl FromStr for ArtifactId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
