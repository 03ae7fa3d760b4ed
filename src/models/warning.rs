use serde::{Deserialize, Serialize};

/// The four non-fatal diagnostic kinds the placement engine can emit.
/// Every "error" the core surfaces is data on the output, never an
/// exceptional channel (see `error` module docs for the boundary layer
/// that *is* fallible: constructing value types from untrusted input).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    FamilyTimeCompromised,
    Overloaded,
    DeadlineAtRisk,
    AntiCrammingViolated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
    #[serde(default)]
    pub item_id: Option<String>,
}

impl Warning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            item_id: None,
        }
    }

    pub fn for_item(kind: WarningKind, item_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            item_id: Some(item_id.into()),
        }
    }
}
