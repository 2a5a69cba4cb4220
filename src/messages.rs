//! Typed messages exchanged with the annotation worker.
//!
//! The set of kinds is closed. On the wire each message is a JSON object
//! tagged by `"kind"`, e.g. `{"kind":"annotate","id":3,"text":"漢字"}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Request {
    /// Annotate a selected text span.
    Annotate { id: u64, text: String },
    /// Persist the enabled flag.
    SetEnabled { enabled: bool },
    /// Report the enabled flag.
    GetEnabled,
    /// Stop the worker. No response is sent.
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Response {
    Annotated { id: u64, markup: String },
    Skipped { id: u64, reason: SkipReason },
    Failed { id: u64, error: String },
    Enabled { enabled: bool },
    /// The enabled flag could not be saved; `enabled` is the value still in effect.
    PrefsFailed { enabled: bool, error: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Annotation is switched off.
    Disabled,
    /// The selection contains no kanji.
    NoKanji,
}

impl Request {
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Response {
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// The request ID this response answers, if any.
    pub fn id(&self) -> Option<u64> {
        match self {
            Response::Annotated { id, .. }
            | Response::Skipped { id, .. }
            | Response::Failed { id, .. } => Some(*id),
            Response::Enabled { .. } | Response::PrefsFailed { .. } => None,
        }
    }
}
