//! Run events: the wire contract between the orchestrator and its consumer.
//!
//! Every transition of a run is reported as an [`Event`]. The ordered sequence
//! of events *is* the run's history: events are created once, never mutated,
//! and handed to the caller, who owns them from then on.
//!
//! Serialized form:
//!
//! ```json
//! {"type": "routed", "payload": {"mode": "direct"}, "ts": "2026-01-01T00:00:00Z"}
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::memory::MemorySnapshot;
use crate::plan::PlanStep;

/// Stop reason when plan mode was requested without a planner.
pub const REASON_PLANNER_MISSING: &str = "planner_missing";
/// Stop reason when the step budget ran out.
pub const REASON_MAX_STEPS: &str = "max_steps";
/// Stop reason used when a `stop` action carries none.
pub const REASON_STOPPED: &str = "stopped";

/// A single immutable run event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(flatten)]
    pub kind: EventKind,

    /// Wall-clock time at emission.
    pub ts: DateTime<Utc>,
}

/// The event vocabulary.
///
/// Marked `#[non_exhaustive]`: consumers must ignore kinds they do not know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
#[non_exhaustive]
pub enum EventKind {
    /// The router picked the effective mode.
    Routed { mode: String },

    /// The planner produced a plan.
    Planned { steps: Vec<PlanStep>, count: usize },

    /// The decision loop is about to start.
    LoopStarted { max_steps: usize },

    /// The thinker returned an action; `memory` is the snapshot taken before the step.
    Thought {
        action: Action,
        memory: MemorySnapshot,
    },

    /// A tool ran successfully.
    ToolResult {
        name: String,
        result: serde_json::Value,
    },

    /// A tool call failed, or could not be made.
    ToolError {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        error: String,
    },

    /// The thinker produced a final answer. Terminal.
    Completed { response: String },

    /// The run ended without an answer. Terminal.
    Stopped { reason: String },
}

impl Event {
    /// Stamp an event kind with the current time.
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            ts: Utc::now(),
        }
    }

    /// The wire tag for this event (`"routed"`, `"thought"`, ...).
    pub fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    /// The payload as a JSON object.
    pub fn payload(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(&self.kind) {
            Ok(serde_json::Value::Object(mut obj)) => match obj.remove("payload") {
                Some(serde_json::Value::Object(payload)) => payload,
                _ => serde_json::Map::new(),
            },
            _ => serde_json::Map::new(),
        }
    }

    /// Whether this event ends a run.
    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }
}

impl EventKind {
    /// The wire tag for this kind.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Routed { .. } => "routed",
            Self::Planned { .. } => "planned",
            Self::LoopStarted { .. } => "loop_started",
            Self::Thought { .. } => "thought",
            Self::ToolResult { .. } => "tool_result",
            Self::ToolError { .. } => "tool_error",
            Self::Completed { .. } => "completed",
            Self::Stopped { .. } => "stopped",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed { .. } | Self::Stopped { .. })
    }

    pub fn stopped(reason: impl Into<String>) -> Self {
        Self::Stopped {
            reason: reason.into(),
        }
    }
}

impl From<EventKind> for Event {
    fn from(kind: EventKind) -> Self {
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_type_payload_and_ts() {
        let event = Event::new(EventKind::Routed {
            mode: "direct".into(),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "routed");
        assert_eq!(json["payload"]["mode"], "direct");
        assert!(json["ts"].is_string());
    }

    #[test]
    fn tool_error_without_name_omits_field() {
        let event = Event::new(EventKind::ToolError {
            name: None,
            error: "tool action missing name".into(),
        });
        let payload = event.payload();
        assert!(!payload.contains_key("name"));
        assert_eq!(payload["error"], "tool action missing name");
    }

    #[test]
    fn payload_of_planned_carries_steps_and_count() {
        let event = Event::new(EventKind::Planned {
            steps: vec![PlanStep::new("1", "first")],
            count: 1,
        });
        let payload = event.payload();
        assert_eq!(payload["count"], 1);
        assert_eq!(payload["steps"][0]["goal"], "first");
    }

    #[test]
    fn event_deserialization() {
        let json = r#"{"type":"stopped","payload":{"reason":"max_steps"},"ts":"2026-01-01T00:00:00Z"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind, EventKind::stopped(REASON_MAX_STEPS));
        assert!(event.is_terminal());
    }

    #[test]
    fn event_type_names() {
        let cases = [
            (EventKind::Routed { mode: "plan".into() }, "routed"),
            (EventKind::LoopStarted { max_steps: 8 }, "loop_started"),
            (
                EventKind::ToolResult {
                    name: "echo".into(),
                    result: serde_json::json!({}),
                },
                "tool_result",
            ),
            (EventKind::Completed { response: "ok".into() }, "completed"),
            (EventKind::stopped("done"), "stopped"),
        ];
        for (kind, expected) in cases {
            assert_eq!(kind.event_type(), expected);
        }
    }

    #[test]
    fn only_completed_and_stopped_are_terminal() {
        assert!(EventKind::Completed { response: String::new() }.is_terminal());
        assert!(EventKind::stopped(REASON_STOPPED).is_terminal());
        assert!(!EventKind::LoopStarted { max_steps: 1 }.is_terminal());
        assert!(
            !EventKind::ToolError {
                name: Some("x".into()),
                error: "y".into()
            }
            .is_terminal()
        );
    }
}
