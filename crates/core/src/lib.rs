//! # Super Agent Core
//!
//! Domain types, collaborator traits, and error definitions for the Super Agent
//! orchestration loop. This crate has **no async runtime dependency**; it defines
//! the domain model that every other crate implements against.
//!
//! ## Design Philosophy
//!
//! Every collaborator the orchestrator consumes (router, planner, thinker,
//! memory, tool registry) is a trait here. Implementations live in their
//! respective crates. This enables:
//! - Swapping a rule-based thinker for a model-backed one without touching the loop
//! - Easy testing with scripted/stub collaborators
//! - Clean dependency graph (all crates depend inward on core)

pub mod action;
pub mod agent;
pub mod error;
pub mod event;
pub mod memory;
pub mod plan;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use action::Action;
pub use agent::{Context, MODE_DIRECT, MODE_PLAN, Planner, Router, Thinker, ThinkerInput};
pub use error::{Error, MemoryError, Result, ToolError};
pub use event::{Event, EventKind};
pub use memory::{MEMORY_PATCH_KEY, Memory, MemorySnapshot, memory_patch};
pub use plan::PlanStep;
pub use tool::{Tool, ToolDefinition, ToolRegistry, ToolSet};
