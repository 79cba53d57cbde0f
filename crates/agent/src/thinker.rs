//! Reference thinkers.
//!
//! [`RuleThinker`] is a small hand-written brain that knows one trick
//! (weather). [`ScriptedThinker`] replays a fixed list of actions and is what
//! most tests use.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use super_agent_core::action::Action;
use super_agent_core::agent::{MODE_PLAN, Thinker, ThinkerInput};
use super_agent_core::error::{Error, Result};

/// Memory key the weather tool writes its summary to.
pub const LAST_TOOL_RESULT: &str = "last_tool_result";

const WEATHER_TOOL: &str = "get_weather";
const FALLBACK_ANSWER: &str = "I don't know how to handle that yet.";

/// Rule-based thinker.
///
/// In plan mode it first walks the plan with `think` actions until the
/// cursor reaches the last step. Then:
///
/// 1. if memory holds `last_tool_result`, answer with it
/// 2. else if the request mentions weather and `get_weather` is registered,
///    call it (with `location` from the context when present)
/// 3. else give up politely
#[derive(Debug, Default)]
pub struct RuleThinker;

impl RuleThinker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Thinker for RuleThinker {
    async fn next_action(&self, input: ThinkerInput<'_>) -> Result<Action> {
        if input.mode == MODE_PLAN && input.step_index + 1 < input.plan.len() {
            let goal = input.current_step().map(|s| s.goal.as_str()).unwrap_or_default();
            return Ok(Action::think(format!(
                "Working on step {}: {goal}",
                input.step_index + 1
            )));
        }

        let memory = input.memory.load().await?;
        if let Some(last) = memory.get(LAST_TOOL_RESULT) {
            let text = match last {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return Ok(Action::final_answer(format!("The weather is {text}")));
        }

        let wants_weather = input.request.to_lowercase().contains("weather");
        if wants_weather && input.tools.list_tools().iter().any(|t| t == WEATHER_TOOL) {
            let mut args = json!({});
            if let Some(location) = input.context.and_then(|c| c.get("location")) {
                args["location"] = location.clone();
            }
            return Ok(Action::tool(WEATHER_TOOL, args));
        }

        Ok(Action::final_answer(FALLBACK_ANSWER))
    }
}

/// Replays a fixed sequence of actions, then stops with `script_exhausted`.
///
/// One script is shared by every run that uses this thinker.
pub struct ScriptedThinker {
    actions: Mutex<VecDeque<Action>>,
}

/// Stop reason once the script has run out.
pub const SCRIPT_EXHAUSTED: &str = "script_exhausted";

impl ScriptedThinker {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: Mutex::new(actions.into_iter().collect()),
        }
    }

    /// Actions not yet handed out.
    pub fn remaining(&self) -> usize {
        self.actions.lock().map(|a| a.len()).unwrap_or(0)
    }
}

#[async_trait]
impl Thinker for ScriptedThinker {
    async fn next_action(&self, _input: ThinkerInput<'_>) -> Result<Action> {
        let mut actions = self
            .actions
            .lock()
            .map_err(|e| Error::Thinker(format!("script lock poisoned: {e}")))?;
        Ok(actions
            .pop_front()
            .unwrap_or_else(|| Action::stop(SCRIPT_EXHAUSTED)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super_agent_core::agent::MODE_DIRECT;
    use super_agent_core::memory::Memory;
    use super_agent_core::plan::PlanStep;
    use super_agent_core::tool::ToolSet;
    use super_agent_memory::InMemoryStore;
    use super_agent_tools::default_registry;

    fn input<'a>(
        request: &'a str,
        memory: &'a dyn Memory,
        tools: &'a ToolSet,
    ) -> ThinkerInput<'a> {
        ThinkerInput {
            request,
            mode: MODE_DIRECT,
            plan: &[],
            step_index: 0,
            memory,
            tools,
            context: None,
        }
    }

    #[tokio::test]
    async fn weather_request_calls_tool() {
        let memory = InMemoryStore::new();
        let tools = default_registry();
        let mut context = super_agent_core::agent::Context::new();
        context.insert("location".into(), "Oslo".into());

        let mut inp = input("What's the weather?", &memory, &tools);
        inp.context = Some(&context);

        let action = RuleThinker.next_action(inp).await.unwrap();
        assert_eq!(action, Action::tool("get_weather", json!({"location": "Oslo"})));
    }

    #[tokio::test]
    async fn answers_from_memory() {
        let memory = InMemoryStore::new();
        memory
            .update(json!({"last_tool_result": "Sunny and 70 degrees."}).as_object().cloned().unwrap())
            .await
            .unwrap();
        let tools = default_registry();

        let action = RuleThinker
            .next_action(input("What's the weather?", &memory, &tools))
            .await
            .unwrap();
        assert_eq!(action, Action::final_answer("The weather is Sunny and 70 degrees."));
    }

    #[tokio::test]
    async fn weather_without_tool_falls_back() {
        let memory = InMemoryStore::new();
        let tools = ToolSet::new();
        let action = RuleThinker
            .next_action(input("weather please", &memory, &tools))
            .await
            .unwrap();
        assert_eq!(action, Action::final_answer(FALLBACK_ANSWER));
    }

    #[tokio::test]
    async fn walks_plan_before_acting() {
        let memory = InMemoryStore::new();
        let tools = default_registry();
        let plan = vec![PlanStep::new("1", "find city"), PlanStep::new("2", "weather")];

        let mut inp = input("find city then weather", &memory, &tools);
        inp.mode = MODE_PLAN;
        inp.plan = &plan;
        let action = RuleThinker.next_action(inp).await.unwrap();
        assert_eq!(action.action_type(), "think");

        inp.step_index = 1;
        let action = RuleThinker.next_action(inp).await.unwrap();
        assert_eq!(action.action_type(), "tool");
    }

    #[tokio::test]
    async fn script_replays_then_stops() {
        let memory = InMemoryStore::new();
        let tools = ToolSet::new();
        let thinker = ScriptedThinker::new([Action::think("a"), Action::final_answer("b")]);

        assert_eq!(thinker.next_action(input("x", &memory, &tools)).await.unwrap(), Action::think("a"));
        assert_eq!(thinker.remaining(), 1);
        assert_eq!(
            thinker.next_action(input("x", &memory, &tools)).await.unwrap(),
            Action::final_answer("b")
        );
        assert_eq!(
            thinker.next_action(input("x", &memory, &tools)).await.unwrap(),
            Action::stop(SCRIPT_EXHAUSTED)
        );
    }
}
