//! Decision-side collaborator traits: router, planner, thinker.
//!
//! These three are trusted integration points. When one of them fails the
//! orchestrator does not recover: the error ends the run and reaches the
//! caller. Tool failures, by contrast, are reported as events.

use async_trait::async_trait;

use crate::action::Action;
use crate::error::Result;
use crate::memory::Memory;
use crate::plan::PlanStep;
use crate::tool::ToolRegistry;

/// Free-form request context passed through to every collaborator.
pub type Context = serde_json::Map<String, serde_json::Value>;

/// Mode without planning.
pub const MODE_DIRECT: &str = "direct";
/// Mode that asks the planner for a plan before looping.
pub const MODE_PLAN: &str = "plan";

/// Picks the mode for a request.
#[async_trait]
pub trait Router: Send + Sync {
    /// Return the mode. An empty string means "use the configured default".
    async fn route(&self, request: &str, context: Option<&Context>) -> Result<String>;
}

/// Breaks a request into ordered steps.
#[async_trait]
pub trait Planner: Send + Sync {
    async fn decompose(&self, request: &str, context: Option<&Context>) -> Result<Vec<PlanStep>>;
}

/// Everything a thinker sees when asked for the next action.
#[derive(Clone, Copy)]
pub struct ThinkerInput<'a> {
    pub request: &'a str,
    pub mode: &'a str,
    pub plan: &'a [PlanStep],
    /// Cursor into `plan`; always 0 when the plan is empty.
    pub step_index: usize,
    pub memory: &'a dyn Memory,
    pub tools: &'a dyn ToolRegistry,
    pub context: Option<&'a Context>,
}

impl<'a> ThinkerInput<'a> {
    /// The plan step under the cursor, if any.
    pub fn current_step(&self) -> Option<&'a PlanStep> {
        self.plan.get(self.step_index)
    }
}

/// The decision function of the loop.
#[async_trait]
pub trait Thinker: Send + Sync {
    async fn next_action(&self, input: ThinkerInput<'_>) -> Result<Action>;
}
