//! `super-agent run`: Run one request and stream its events.

use std::sync::Arc;

use clap::Args;
use futures::StreamExt;
use super_agent_agent::{KeywordRouter, Orchestrator, RuleThinker, SentencePlanner};
use super_agent_config::{ConfigOverrides, OrchestratorConfig};
use super_agent_core::{Action, Context, Event, EventKind};
use super_agent_tools::default_registry;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// The request to run
    #[arg(short, long)]
    pub message: String,

    /// Request context as a JSON object, e.g. '{"location": "Oslo"}'
    #[arg(short, long)]
    pub context: Option<String>,

    /// Override the step budget
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Override the fallback mode
    #[arg(long)]
    pub mode_default: Option<String>,

    /// Enable the sentence planner (needed for plan mode)
    #[arg(long)]
    pub planner: bool,

    /// Route with trigger words instead of always using the default mode
    #[arg(long)]
    pub keyword_router: bool,

    /// Print one JSON object per event
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let context = args.context.as_deref().map(parse_context).transpose()?;

    let overrides = ConfigOverrides {
        max_steps: args.max_steps,
        mode_default: args.mode_default.clone(),
    };
    let config = OrchestratorConfig::load(Some(overrides))
        .map_err(|e| format!("Failed to load config: {e}"))?;

    let mut orchestrator = Orchestrator::new(Arc::new(RuleThinker), Arc::new(default_registry()))
        .with_config(config);
    if args.keyword_router {
        orchestrator = orchestrator.with_router(Arc::new(KeywordRouter::new()));
    }
    if args.planner {
        orchestrator = orchestrator.with_planner(Arc::new(SentencePlanner::new()));
    }

    let mut events = orchestrator.run(args.message, context);
    while let Some(item) = events.next().await {
        let event = item?;
        if args.json {
            println!("{}", serde_json::to_string(&event)?);
        } else {
            println!("{}", format_event(&event));
        }
    }

    Ok(())
}

fn parse_context(raw: &str) -> Result<Context, Box<dyn std::error::Error>> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(format!("--context must be a JSON object, got {other}").into()),
    }
}

/// One human-readable line (or block, for plans) per event.
fn format_event(event: &Event) -> String {
    let time = event.ts.format("%H:%M:%S%.3f");
    let body = match &event.kind {
        EventKind::Routed { mode } => format!("routed        mode={mode}"),
        EventKind::Planned { steps, count } => {
            let mut out = format!("planned       {count} step(s)");
            for step in steps {
                out.push_str(&format!("\n              {}. {}", step.id, step.goal));
            }
            out
        }
        EventKind::LoopStarted { max_steps } => format!("loop_started  max_steps={max_steps}"),
        EventKind::Thought { action, .. } => format!("thought       {}", describe(action)),
        EventKind::ToolResult { name, result } => format!("tool_result   {name} → {result}"),
        EventKind::ToolError { name, error } => match name {
            Some(name) => format!("tool_error    {name}: {error}"),
            None => format!("tool_error    {error}"),
        },
        EventKind::Completed { response } => format!("completed     {response}"),
        EventKind::Stopped { reason } => format!("stopped       reason={reason}"),
        _ => format!(
            "{:<13} {}",
            event.event_type(),
            serde_json::Value::Object(event.payload())
        ),
    };
    format!("[{time}] {body}")
}

fn describe(action: &Action) -> String {
    match action {
        Action::Final { response } => format!("final: {response}"),
        Action::Tool { name, input } => format!("tool {name} {input}"),
        Action::Think { thought } => format!("think: {}", thought.as_deref().unwrap_or("…")),
        Action::Stop { reason } => format!("stop: {}", reason.as_deref().unwrap_or("-")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use super_agent_core::PlanStep;

    #[test]
    fn context_must_be_an_object() {
        let ctx = parse_context(r#"{"location": "Oslo"}"#).unwrap();
        assert_eq!(ctx["location"], "Oslo");
        assert!(parse_context("[1, 2]").is_err());
        assert!(parse_context("not json").is_err());
    }

    #[test]
    fn formats_terminal_events() {
        let line = format_event(&Event::new(EventKind::Completed {
            response: "The weather is Sunny and 70 degrees.".into(),
        }));
        assert!(line.ends_with("completed     The weather is Sunny and 70 degrees."));

        let line = format_event(&Event::new(EventKind::stopped("max_steps")));
        assert!(line.ends_with("reason=max_steps"));
    }

    #[test]
    fn formats_plan_steps_on_separate_lines() {
        let text = format_event(&Event::new(EventKind::Planned {
            steps: vec![PlanStep::new("1", "find city"), PlanStep::new("2", "check weather")],
            count: 2,
        }));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].ends_with("2. check weather"));
    }

    #[test]
    fn formats_tool_thoughts() {
        let text = format_event(&Event::new(EventKind::Thought {
            action: Action::tool("get_weather", json!({"location": "Oslo"})),
            memory: Default::default(),
        }));
        assert!(text.contains(r#"tool get_weather {"location":"Oslo"}"#));
    }

    #[test]
    fn tool_error_without_name() {
        let text = format_event(&Event::new(EventKind::ToolError {
            name: None,
            error: "tool action missing name".into(),
        }));
        assert!(text.ends_with("tool_error    tool action missing name"));
    }
}
