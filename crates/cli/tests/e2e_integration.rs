//! End-to-end tests for the Super Agent stack.
//!
//! These wire the same parts the `run` command does (config resolution,
//! built-in tools, rule thinker, routers and planner) and drive full runs.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::StreamExt;
use serde_json::json;
use super_agent_agent::{KeywordRouter, Orchestrator, RuleThinker, SentencePlanner};
use super_agent_config::{ConfigOverrides, OrchestratorConfig};
use super_agent_core::{Action, Context, Event, EventKind, Thinker, ThinkerInput};
use super_agent_memory::{InMemoryStore, NoopMemory};
use super_agent_tools::default_registry;

fn types(events: &[Event]) -> Vec<&'static str> {
    events.iter().map(|e| e.event_type()).collect()
}

fn stack() -> Orchestrator {
    Orchestrator::new(Arc::new(RuleThinker), Arc::new(default_registry()))
        .with_router(Arc::new(KeywordRouter::new()))
        .with_planner(Arc::new(SentencePlanner::new()))
}

#[tokio::test]
async fn weather_request_completes_with_tool_answer() {
    let mut context = Context::new();
    context.insert("location".into(), json!("Lisbon"));

    let events = stack()
        .run_collect("What's the weather like?", Some(context))
        .await
        .unwrap();

    assert_eq!(
        types(&events),
        ["routed", "loop_started", "thought", "tool_result", "thought", "completed"]
    );
    assert_eq!(events[3].payload()["result"]["location"], "Lisbon");

    let EventKind::Completed { response } = &events.last().unwrap().kind else {
        panic!("run did not complete");
    };
    assert!(response.starts_with("The weather is "));
    assert!(response.ends_with("degrees."));
}

#[tokio::test]
async fn planned_weather_request_walks_steps_first() {
    let events = stack()
        .run_collect("Find my city then get the weather", None)
        .await
        .unwrap();

    assert_eq!(events[0].kind, EventKind::Routed { mode: "plan".into() });
    assert_eq!(events[1].payload()["count"], 2);
    assert_eq!(
        types(&events)[2..],
        [
            "loop_started",
            "thought",
            "thought",
            "tool_result",
            "thought",
            "completed"
        ]
    );
    assert_eq!(events[3].payload()["action"]["type"], "think");
}

#[tokio::test]
async fn unknown_request_gets_fallback_answer() {
    let events = stack().run_collect("Sing me a song", None).await.unwrap();
    assert_eq!(
        events.last().unwrap().kind,
        EventKind::Completed {
            response: "I don't know how to handle that yet.".into()
        }
    );
}

#[tokio::test]
async fn noop_memory_exhausts_the_budget() {
    // Without memory the rule thinker never sees the tool result and keeps asking.
    let config = OrchestratorConfig::resolve([ConfigOverrides::new().with_max_steps(2)]).unwrap();
    let orch = Orchestrator::new(Arc::new(RuleThinker), Arc::new(default_registry()))
        .with_memory(Arc::new(NoopMemory))
        .with_config(config);

    let events = orch.run_collect("weather?", None).await.unwrap();
    assert_eq!(
        types(&events),
        [
            "routed",
            "loop_started",
            "thought",
            "tool_result",
            "thought",
            "tool_result",
            "stopped"
        ]
    );
    assert_eq!(events.last().unwrap().kind, EventKind::stopped("max_steps"));
}

#[tokio::test]
async fn config_file_and_runtime_layers_reach_the_loop() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_steps = 4\nmode_default = \"direct\"").unwrap();

    let from_file = OrchestratorConfig::resolve([ConfigOverrides::load_file(file.path()).unwrap()])
        .unwrap();
    let events = stack()
        .with_config(from_file)
        .run_collect("hello", None)
        .await
        .unwrap();
    assert_eq!(events[1].kind, EventKind::LoopStarted { max_steps: 4 });

    let layered = OrchestratorConfig::resolve([
        ConfigOverrides::load_file(file.path()).unwrap(),
        ConfigOverrides::new().with_max_steps(9),
    ])
    .unwrap();
    assert_eq!(layered.max_steps, 9);
}

#[tokio::test]
async fn events_serialize_as_type_payload_ts() {
    let events = stack().run_collect("hello", None).await.unwrap();

    for event in &events {
        let value = serde_json::to_value(event).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 3, "unexpected shape: {value}");
        assert_eq!(obj["type"], event.event_type());
        assert!(obj["payload"].is_object());
        assert!(obj["ts"].is_string());
    }
}

#[tokio::test]
async fn shared_memory_carries_across_runs() {
    let memory = Arc::new(InMemoryStore::new());
    let orch = stack().with_memory(memory.clone());

    orch.run_collect("weather in town?", None).await.unwrap();
    assert!(!memory.is_empty().await);

    // The second run answers straight from memory, without calling the tool.
    let events = orch.run_collect("weather again?", None).await.unwrap();
    assert_eq!(types(&events), ["routed", "loop_started", "thought", "completed"]);
}

/// Always thinks and counts how often it was asked.
#[derive(Default)]
struct CountingThinker {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl Thinker for CountingThinker {
    async fn next_action(&self, _input: ThinkerInput<'_>) -> super_agent_core::Result<Action> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Action::think("still thinking"))
    }
}

#[tokio::test]
async fn dropping_spawned_stream_stops_the_run() {
    let thinker = Arc::new(CountingThinker::default());
    let config = OrchestratorConfig::resolve([ConfigOverrides::new().with_max_steps(8)]).unwrap();
    let orch = Orchestrator::new(thinker.clone(), Arc::new(default_registry())).with_config(config);

    let mut rx = orch.spawn("keep going", None);
    let first = rx.next().await.unwrap().unwrap();
    assert_eq!(first.event_type(), "routed");
    drop(rx);

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    let after_drop = thinker.calls.load(Ordering::SeqCst);
    assert!(after_drop < 8, "thinker ran {after_drop} times after the reader left");

    // A run nobody abandons uses the whole budget.
    let full = Arc::new(CountingThinker::default());
    let orch = Orchestrator::new(full.clone(), Arc::new(default_registry()))
        .with_config(OrchestratorConfig::resolve([ConfigOverrides::new().with_max_steps(8)]).unwrap());
    let events: Vec<_> = orch.spawn("keep going", None).collect().await;
    assert_eq!(events.len(), 11);
    assert_eq!(full.calls.load(Ordering::SeqCst), 8);
}
