//! Error types for the Super Agent domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.
//!
//! Two channels are kept apart on purpose: [`ToolError`] is an operational
//! outcome that the orchestrator turns into a `tool_error` event, while the
//! remaining variants of [`Error`] are contract violations that end a run.

use thiserror::Error;

/// The top-level error type for all Super Agent operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Memory errors ---
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    // --- Collaborator errors ---
    #[error("Router failed: {0}")]
    Router(String),

    #[error("Planner failed: {0}")]
    Planner(String),

    #[error("Thinker failed: {0}")]
    Thinker(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ToolError {
    #[error("Tool '{0}' not found")]
    NotFound(String),

    #[error("Tool execution failed: {tool_name}: {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}

#[derive(Debug, Clone, Error)]
pub enum MemoryError {
    #[error("Storage error: {0}")]
    Storage(String),
}
