use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Access tier controlling how an envelope may be read and listed.
///
/// Visibility is a property of the envelope, never of the payload.
/// Newly created envelopes default to [`Visibility::Unlisted`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Readable by anyone; appears in everyone's listings.
    Public,
    /// Readable only by the owner and explicitly granted principals.
    Private,
    /// Readable by anyone holding the identifier, but not discoverable
    /// through listing or search.
    #[default]
    Unlisted,
}

impl Visibility {
    /// The lowercase wire literal for this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Unlisted => "unlisted",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            "unlisted" => Ok(Self::Unlisted),
            other => Err(TypeError::InvalidVisibility(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unlisted() {
        assert_eq!(Visibility::default(), Visibility::Unlisted);
    }

    #[test]
    fn wire_literals_roundtrip() {
        for v in [Visibility::Public, Visibility::Private, Visibility::Unlisted] {
            let parsed: Visibility = v.as_str().parse().unwrap();
            assert_eq!(v, parsed);
        }
    }

    #[test]
    fn invalid_literal_rejected() {
        let err = "hidden".parse::<Visibility>().unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidVisibility("hidden".to_string())
        );
    }

    #[test]
    fn serde_uses_lowercase_literals() {
        assert_eq!(
            serde_json::to_string(&Visibility::Unlisted).unwrap(),
            "\"unlisted\""
        );
        let parsed: Visibility = serde_json::from_str("\"private\"").unwrap();
        assert_eq!(parsed, Visibility::Private);
    }

    #[test]
    fn serde_rejects_unknown_literal() {
        assert!(serde_json::from_str::<Visibility>("\"secret\"").is_err());
    }
}
