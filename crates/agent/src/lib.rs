//! The orchestration loop: the heart of Super Agent.
//!
//! A run follows a **Route → Plan → Think → Act** cycle:
//!
//! 1. **Route** the request to a mode (`direct` or `plan`)
//! 2. **Plan**, in plan mode only: ask the planner for ordered steps
//! 3. **Think**: snapshot memory and ask the thinker for the next action
//! 4. **Act**: answer, stop, run a tool, or keep thinking
//!
//! Steps 3–4 repeat until a terminal action or the step budget runs out.
//! Every transition is reported as an [`Event`](super_agent_core::Event) on a
//! lazily evaluated stream.
//!
//! This crate also ships reference collaborators (routers, a planner, and
//! thinkers) so the loop runs end to end without a model.

pub mod orchestrator;
pub mod planner;
pub mod router;
pub mod thinker;

pub use orchestrator::{EventStream, Orchestrator};
pub use planner::SentencePlanner;
pub use router::{KeywordRouter, StaticRouter};
pub use thinker::{RuleThinker, ScriptedThinker};
