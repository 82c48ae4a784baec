//! Built-in artifact kinds and their ready-made adapters.
//!
//! These mirror the artifact kinds the platform produces: question and
//! survey definitions, agent configurations, computed result sets,
//! notebooks, and response caches. Each kind is a plain serde type with a
//! `JsonAdapter` constructor; the registry stores all of them the same way.

use std::collections::BTreeMap;

use arx_types::ObjectType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::adapter::JsonAdapter;

/// A single question definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuestionDef {
    /// Machine name, unique within a survey.
    pub name: String,
    /// The text shown to the respondent.
    pub text: String,
    /// Question kind literal (free_text, multiple_choice, ...).
    pub kind: String,
    /// Answer options, for kinds that enumerate them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl QuestionDef {
    pub fn adapter() -> JsonAdapter<Self> {
        JsonAdapter::new(ObjectType::Question)
    }
}

/// A survey: an ordered collection of questions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurveyDef {
    pub name: String,
    pub questions: Vec<QuestionDef>,
}

impl SurveyDef {
    pub fn adapter() -> JsonAdapter<Self> {
        JsonAdapter::new(ObjectType::Survey)
    }
}

/// An agent configuration: persona traits plus an optional instruction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub traits: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
}

impl AgentConfig {
    pub fn adapter() -> JsonAdapter<Self> {
        JsonAdapter::new(ObjectType::Agent)
    }
}

/// A computed result set: one row per (agent, question) answer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub survey_name: String,
    pub rows: Vec<BTreeMap<String, Value>>,
}

impl ResultSet {
    pub fn adapter() -> JsonAdapter<Self> {
        JsonAdapter::new(ObjectType::Result)
    }
}

/// A notebook document: ordered cells of source text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    pub title: String,
    pub cells: Vec<NotebookCell>,
}

/// One notebook cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotebookCell {
    /// Cell kind literal (code or markdown).
    pub kind: String,
    pub source: String,
}

impl Notebook {
    pub fn adapter() -> JsonAdapter<Self> {
        JsonAdapter::new(ObjectType::Notebook)
    }
}

/// A cache of prior model responses, keyed by request fingerprint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheEntries {
    pub entries: BTreeMap<String, Value>,
}

impl CacheEntries {
    pub fn adapter() -> JsonAdapter<Self> {
        JsonAdapter::new(ObjectType::Cache)
    }
}
