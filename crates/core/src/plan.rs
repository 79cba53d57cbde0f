//! Plan step descriptors.

use serde::{Deserialize, Serialize};

/// One step of a plan.
///
/// Planners may attach any further fields; they are kept in `extra` and
/// travel with the step untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStep {
    pub id: String,
    pub goal: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PlanStep {
    pub fn new(id: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            goal: goal.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Attach an extra field.
    pub fn with(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}
