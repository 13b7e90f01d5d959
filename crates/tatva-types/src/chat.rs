//! Request/response types for the chat backend boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::capsule::SearchSnapshot;
use crate::property::{Hub, Property, RawSearchZone};

/// Whether the assistant considers the search finished for this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnStatus {
    Complete,
    #[default]
    Incomplete,
}

impl fmt::Display for TurnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnStatus::Complete => write!(f, "complete"),
            TurnStatus::Incomplete => write!(f, "incomplete"),
        }
    }
}

impl FromStr for TurnStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "complete" => Ok(TurnStatus::Complete),
            "incomplete" => Ok(TurnStatus::Incomplete),
            other => Err(format!("invalid turn status: '{other}'")),
        }
    }
}

/// One user message sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
}

/// The backend's answer to one [`ChatRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Assistant reply shown in the conversation.
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub status: TurnStatus,
    #[serde(default)]
    pub properties: Option<Vec<Property>>,
    #[serde(default)]
    pub family_hubs: Option<Vec<Hub>>,
    /// Structured rental requirements collected so far.
    #[serde(default)]
    pub data: Option<SearchSnapshot>,
    #[serde(default)]
    pub search_zone: Option<RawSearchZone>,
}

impl ChatResponse {
    /// A response is usable when it carries a non-blank reply.
    pub fn has_payload(&self) -> bool {
        !self.response.trim().is_empty()
    }

    /// Whether this turn should produce a search capsule.
    pub fn is_result_bearing(&self) -> bool {
        self.status == TurnStatus::Complete
            && self.properties.as_ref().is_some_and(|p| !p.is_empty())
    }
}
