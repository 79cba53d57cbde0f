//! The orchestrator run loop.
//!
//! [`Orchestrator::run`] returns a stream that does nothing until polled.
//! Each poll advances the run state machine just far enough to produce the
//! next event:
//!
//! ```text
//! START → ROUTE → (PLAN?) → LOOP ⟲ → COMPLETED | STOPPED
//! ```
//!
//! Failures during the tool step (the call itself, or applying the memory
//! patch it returned) become `tool_error` events and the loop goes on.
//! Router, planner, thinker and memory-load failures are yielded as the
//! stream's final `Err` item.

use std::pin::Pin;
use std::sync::Arc;

use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use super_agent_config::OrchestratorConfig;
use super_agent_core::action::Action;
use super_agent_core::agent::{Context, MODE_PLAN, Planner, Router, Thinker, ThinkerInput};
use super_agent_core::error::Result;
use super_agent_core::event::{
    Event, EventKind, REASON_MAX_STEPS, REASON_PLANNER_MISSING, REASON_STOPPED,
};
use super_agent_core::memory::{Memory, MemorySnapshot, memory_patch};
use super_agent_core::plan::PlanStep;
use super_agent_core::tool::ToolRegistry;
use super_agent_memory::InMemoryStore;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{Instrument, debug, info, warn};
use uuid::Uuid;

use crate::router::StaticRouter;

/// A lazily produced sequence of run events.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<Event>> + Send>>;

/// Composes router, planner, thinker, memory and tools into a bounded decision loop.
///
/// Cloning is cheap (collaborators are shared `Arc`s); each call to
/// [`run`](Self::run) owns its own run state.
#[derive(Clone)]
pub struct Orchestrator {
    /// Picks the mode for each request
    router: Arc<dyn Router>,

    /// Only consulted in plan mode
    planner: Option<Arc<dyn Planner>>,

    /// Decides the next action
    thinker: Arc<dyn Thinker>,

    /// Run memory, snapshotted before every decision
    memory: Arc<dyn Memory>,

    /// Tools the thinker may call
    tools: Arc<dyn ToolRegistry>,

    /// Resolved configuration
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Create an orchestrator with default parts: a router that always defers
    /// to `mode_default`, an empty in-memory store, no planner, and default
    /// configuration.
    pub fn new(thinker: Arc<dyn Thinker>, tools: Arc<dyn ToolRegistry>) -> Self {
        Self {
            router: Arc::new(StaticRouter::deferring()),
            planner: None,
            thinker,
            memory: Arc::new(InMemoryStore::new()),
            tools,
            config: OrchestratorConfig::default(),
        }
    }

    pub fn with_router(mut self, router: Arc<dyn Router>) -> Self {
        self.router = router;
        self
    }

    pub fn with_planner(mut self, planner: Arc<dyn Planner>) -> Self {
        self.planner = Some(planner);
        self
    }

    pub fn with_memory(mut self, memory: Arc<dyn Memory>) -> Self {
        self.memory = memory;
        self
    }

    /// Use an already resolved configuration.
    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn memory(&self) -> &Arc<dyn Memory> {
        &self.memory
    }

    pub fn tools(&self) -> &Arc<dyn ToolRegistry> {
        &self.tools
    }

    /// Start a run. Nothing happens until the stream is polled; dropping the
    /// stream abandons the run.
    pub fn run(&self, request: impl Into<String>, context: Option<Context>) -> EventStream {
        let run = Run::new(self.clone(), request.into(), context);

        Box::pin(stream::unfold(run, |mut run| async move {
            let span = run.span.clone();
            let item = run.step().instrument(span).await;
            item.map(|item| (item, run))
        }))
    }

    /// Drive a run to the end and collect its events.
    pub async fn run_collect(
        &self,
        request: impl Into<String>,
        context: Option<Context>,
    ) -> Result<Vec<Event>> {
        self.run(request, context).try_collect().await
    }

    /// Drive a run on a background task, forwarding events through a channel.
    ///
    /// The channel holds one event, so the task stays at most one event ahead
    /// of the reader. Dropping the returned stream stops the run at its next
    /// emission. Must be called from within a Tokio runtime.
    pub fn spawn(
        &self,
        request: impl Into<String>,
        context: Option<Context>,
    ) -> ReceiverStream<Result<Event>> {
        let (tx, rx) = mpsc::channel(1);
        let mut events = self.run(request, context);

        tokio::spawn(async move {
            while let Some(item) = events.next().await {
                if tx.send(item).await.is_err() {
                    debug!("Event receiver dropped, abandoning run");
                    break;
                }
            }
        });

        ReceiverStream::new(rx)
    }
}

/// Where a run is in its state machine.
enum Phase {
    Route,
    Plan,
    PlannerMissing,
    StartLoop,
    /// A tool result carried a memory patch; apply it before the next decision.
    ApplyPatch { tool: String, patch: MemorySnapshot },
    Think,
    Dispatch(Action),
    Done,
}

/// State of one run. Lives inside the event stream and nowhere else.
struct Run {
    orchestrator: Orchestrator,
    request: String,
    context: Option<Context>,
    mode: String,
    plan: Vec<PlanStep>,
    step_index: usize,
    iterations: usize,
    phase: Phase,
    span: tracing::Span,
}

impl Run {
    fn new(orchestrator: Orchestrator, request: String, context: Option<Context>) -> Self {
        let span = tracing::info_span!(
            "run",
            run_id = %Uuid::new_v4(),
            memory = orchestrator.memory.name(),
        );
        Self {
            orchestrator,
            request,
            context,
            mode: String::new(),
            plan: Vec::new(),
            step_index: 0,
            iterations: 0,
            phase: Phase::Route,
            span,
        }
    }

    /// Advance until the next event is ready. `None` once the run is over.
    async fn step(&mut self) -> Option<Result<Event>> {
        loop {
            match std::mem::replace(&mut self.phase, Phase::Done) {
                Phase::Route => {
                    let routed = match self
                        .orchestrator
                        .router
                        .route(&self.request, self.context.as_ref())
                        .await
                    {
                        Ok(mode) => mode,
                        Err(e) => return Some(Err(e)),
                    };

                    self.mode = if routed.is_empty() {
                        self.orchestrator.config.mode_default.clone()
                    } else {
                        routed
                    };
                    info!(mode = %self.mode, "Request routed");

                    self.phase = if self.mode == MODE_PLAN {
                        Phase::Plan
                    } else {
                        Phase::StartLoop
                    };
                    return emit(EventKind::Routed {
                        mode: self.mode.clone(),
                    });
                }

                Phase::Plan => {
                    let Some(planner) = self.orchestrator.planner.clone() else {
                        warn!("Plan mode requested but no planner is configured");
                        self.phase = Phase::PlannerMissing;
                        return emit(EventKind::ToolError {
                            name: None,
                            error: "mode=plan but no planner provided".into(),
                        });
                    };

                    self.plan = match planner
                        .decompose(&self.request, self.context.as_ref())
                        .await
                    {
                        Ok(steps) => steps,
                        Err(e) => return Some(Err(e)),
                    };
                    debug!(steps = self.plan.len(), "Plan ready");

                    self.phase = Phase::StartLoop;
                    return emit(EventKind::Planned {
                        steps: self.plan.clone(),
                        count: self.plan.len(),
                    });
                }

                Phase::PlannerMissing => {
                    return emit(EventKind::stopped(REASON_PLANNER_MISSING));
                }

                Phase::StartLoop => {
                    self.phase = Phase::Think;
                    return emit(EventKind::LoopStarted {
                        max_steps: self.orchestrator.config.max_steps,
                    });
                }

                Phase::Think => {
                    if self.iterations >= self.orchestrator.config.max_steps {
                        info!(iterations = self.iterations, "Step budget exhausted");
                        return emit(EventKind::stopped(REASON_MAX_STEPS));
                    }
                    self.iterations += 1;

                    let memory = match self.orchestrator.memory.load().await {
                        Ok(snapshot) => snapshot,
                        Err(e) => return Some(Err(e.into())),
                    };

                    let input = ThinkerInput {
                        request: &self.request,
                        mode: &self.mode,
                        plan: &self.plan,
                        step_index: self.step_index,
                        memory: self.orchestrator.memory.as_ref(),
                        tools: self.orchestrator.tools.as_ref(),
                        context: self.context.as_ref(),
                    };
                    let action = match self.orchestrator.thinker.next_action(input).await {
                        Ok(action) => action,
                        Err(e) => return Some(Err(e)),
                    };
                    debug!(
                        iteration = self.iterations,
                        step_index = self.step_index,
                        action = action.action_type(),
                        "Thinker decided"
                    );

                    self.phase = Phase::Dispatch(action.clone());
                    return emit(EventKind::Thought { action, memory });
                }

                Phase::Dispatch(action) => match action {
                    Action::Final { response } => {
                        info!(iterations = self.iterations, "Run completed");
                        return emit(EventKind::Completed { response });
                    }

                    Action::Stop { reason } => {
                        let reason = reason.unwrap_or_else(|| REASON_STOPPED.to_string());
                        info!(%reason, "Run stopped by thinker");
                        return emit(EventKind::Stopped { reason });
                    }

                    Action::Tool { name, input } => {
                        let (event, patch) = self.call_tool(name, input).await;
                        self.phase = match patch {
                            Some((tool, patch)) => Phase::ApplyPatch { tool, patch },
                            None => Phase::Think,
                        };
                        return Some(Ok(event));
                    }

                    Action::Think { .. } => {
                        if self.mode == MODE_PLAN && !self.plan.is_empty() {
                            self.step_index = (self.step_index + 1).min(self.plan.len() - 1);
                        }
                        self.phase = Phase::Think;
                    }
                },

                Phase::ApplyPatch { tool, patch } => {
                    debug!(%tool, keys = patch.len(), "Applying memory patch");
                    self.phase = Phase::Think;
                    if let Err(e) = self.orchestrator.memory.update(patch).await {
                        warn!(%tool, error = %e, "Memory patch rejected");
                        return emit(EventKind::ToolError {
                            name: Some(tool),
                            error: e.to_string(),
                        });
                    }
                }

                Phase::Done => return None,
            }
        }
    }

    /// Run one tool action. Returns the event to emit and, on success, the
    /// memory patch the result carried.
    async fn call_tool(
        &self,
        name: String,
        input: serde_json::Value,
    ) -> (Event, Option<(String, MemorySnapshot)>) {
        if name.is_empty() {
            warn!("Tool action without a name");
            let event = Event::new(EventKind::ToolError {
                name: None,
                error: "tool action missing name".into(),
            });
            return (event, None);
        }

        let input = if input.is_null() {
            serde_json::Value::Object(Default::default())
        } else {
            input
        };

        match self
            .orchestrator
            .tools
            .run_tool(&name, input, self.context.as_ref())
            .await
        {
            Ok(result) => {
                let patch = memory_patch(&result).map(|p| (name.clone(), p.clone()));
                (Event::new(EventKind::ToolResult { name, result }), patch)
            }
            Err(e) => {
                warn!(tool = %name, error = %e, "Tool execution failed");
                let event = Event::new(EventKind::ToolError {
                    name: Some(name),
                    error: e.to_string(),
                });
                (event, None)
            }
        }
    }
}

fn emit(kind: EventKind) -> Option<Result<Event>> {
    Some(Ok(Event::new(kind)))
}
