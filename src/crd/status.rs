//! # ProviderConfig Status
//!
//! Status types and the Available/Unavailable condition mapping.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Condition type carrying the availability of a ProviderConfig
pub const CONDITION_TYPE_READY: &str = "Ready";

/// Reason of a Ready=True condition
pub const REASON_AVAILABLE: &str = "Available";

/// Reason of a Ready=False condition
pub const REASON_UNAVAILABLE: &str = "Unavailable";

/// Status of the ProviderConfig resource
#[derive(Debug, Clone, Deserialize, Serialize, Default, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfigStatus {
    /// Conditions represent the latest available observations
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

/// Condition represents a condition of a resource
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition
    pub r#type: String,
    /// Status of the condition (True, False, Unknown)
    pub status: String,
    /// Last transition time
    #[serde(default)]
    pub last_transition_time: Option<String>,
    /// Reason for the condition
    #[serde(default)]
    pub reason: Option<String>,
    /// Message describing the condition
    #[serde(default)]
    pub message: Option<String>,
}

impl Condition {
    /// Ready=True, reason Available
    pub fn available() -> Self {
        Self {
            r#type: CONDITION_TYPE_READY.to_string(),
            status: "True".to_string(),
            last_transition_time: Some(chrono::Utc::now().to_rfc3339()),
            reason: Some(REASON_AVAILABLE.to_string()),
            message: None,
        }
    }

    /// Ready=False, reason Unavailable, always with a message
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            r#type: CONDITION_TYPE_READY.to_string(),
            status: "False".to_string(),
            last_transition_time: Some(chrono::Utc::now().to_rfc3339()),
            reason: Some(REASON_UNAVAILABLE.to_string()),
            message: Some(message.into()),
        }
    }

    /// Same observation, ignoring the transition time
    pub fn equivalent(&self, other: &Self) -> bool {
        self.r#type == other.r#type
            && self.status == other.status
            && self.reason == other.reason
            && self.message == other.message
    }

    pub fn is_available(&self) -> bool {
        self.status == "True" && self.reason.as_deref() == Some(REASON_AVAILABLE)
    }
}

impl ProviderConfigStatus {
    /// Condition of the given type, if present
    pub fn condition(&self, condition_type: &str) -> Option<&Condition> {
        self.conditions
            .iter()
            .find(|c| c.r#type == condition_type)
    }

    /// Replace the condition of the same type, or append it.
    /// An equivalent existing condition keeps its original transition time.
    pub fn set_condition(&mut self, condition: Condition) {
        match self
            .conditions
            .iter_mut()
            .find(|c| c.r#type == condition.r#type)
        {
            Some(existing) if existing.equivalent(&condition) => {}
            Some(existing) => *existing = condition,
            None => self.conditions.push(condition),
        }
    }
}
