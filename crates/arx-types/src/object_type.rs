use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Enumerated tag for the artifact kinds the registry stores.
///
/// The tag is fixed at creation and tells the client which adapter can
/// interpret the envelope's payload; the registry itself never branches on
/// it beyond equality checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    /// A single question definition.
    Question,
    /// A survey: an ordered collection of questions with flow rules.
    Survey,
    /// An agent configuration (persona traits and instructions).
    Agent,
    /// A computed result set from running a survey against agents.
    Result,
    /// A notebook document.
    Notebook,
    /// A cache of prior model responses.
    Cache,
}

impl ObjectType {
    /// All object types, in wire-literal order.
    pub const ALL: [ObjectType; 6] = [
        Self::Question,
        Self::Survey,
        Self::Agent,
        Self::Result,
        Self::Notebook,
        Self::Cache,
    ];

    /// The lowercase wire literal for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Survey => "survey",
            Self::Agent => "agent",
            Self::Result => "result",
            Self::Notebook => "notebook",
            Self::Cache => "cache",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "question" => Ok(Self::Question),
            "survey" => Ok(Self::Survey),
            "agent" => Ok(Self::Agent),
            "result" => Ok(Self::Result),
            "notebook" => Ok(Self::Notebook),
            "cache" => Ok(Self::Cache),
            other => Err(TypeError::UnknownObjectType(other.to_string())),
        }
    }
}
