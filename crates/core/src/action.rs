//! Thinker actions.
//!
//! A thinker answers each loop iteration with one [`Action`]. Thinkers that
//! produce untyped JSON (model-backed ones, typically) go through
//! [`Action::from_value`], which applies the lenient reading rules:
//!
//! - a missing or unrecognised `type` is treated as `think`
//! - the final answer is read from `response`, then `output`, then `content`
//! - a `tool` action without `name` keeps an empty name; the orchestrator
//!   reports it as a `tool_error` instead of calling anything

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", from = "Value")]
pub enum Action {
    /// Answer the request and end the run.
    Final { response: String },

    /// Invoke a tool by name.
    Tool {
        name: String,
        #[serde(default)]
        input: Value,
    },

    /// Intermediate reasoning; in plan mode this advances the plan cursor.
    Think {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thought: Option<String>,
    },

    /// End the run without an answer.
    Stop {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

impl Action {
    pub fn final_answer(response: impl Into<String>) -> Self {
        Self::Final {
            response: response.into(),
        }
    }

    pub fn tool(name: impl Into<String>, input: Value) -> Self {
        Self::Tool {
            name: name.into(),
            input,
        }
    }

    pub fn think(thought: impl Into<String>) -> Self {
        Self::Think {
            thought: Some(thought.into()),
        }
    }

    pub fn stop(reason: impl Into<String>) -> Self {
        Self::Stop {
            reason: Some(reason.into()),
        }
    }

    /// The `type` tag of this action.
    pub fn action_type(&self) -> &'static str {
        match self {
            Self::Final { .. } => "final",
            Self::Tool { .. } => "tool",
            Self::Think { .. } => "think",
            Self::Stop { .. } => "stop",
        }
    }

    /// Read an action from an untyped JSON mapping.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(obj) = value else {
            return Self::Think { thought: None };
        };
        let text = |key: &str| obj.get(key).and_then(value_as_text);

        match obj.get("type").and_then(Value::as_str) {
            Some("final") => Self::Final {
                response: text("response")
                    .or_else(|| text("output"))
                    .or_else(|| text("content"))
                    .unwrap_or_default(),
            },
            Some("tool") => Self::Tool {
                name: text("name").unwrap_or_default(),
                input: match obj.get("input") {
                    Some(Value::Null) | None => Value::Object(Default::default()),
                    Some(v) => v.clone(),
                },
            },
            Some("stop") => Self::Stop {
                reason: text("reason"),
            },
            _ => Self::Think {
                thought: text("thought"),
            },
        }
    }
}

impl From<Value> for Action {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

/// Strings pass through; other scalars are rendered; null and absent read as missing.
fn value_as_text(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
