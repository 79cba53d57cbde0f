//! Tool traits: the abstraction over agent capabilities.
//!
//! Two layers:
//! - [`ToolRegistry`] is the contract the orchestrator consumes: list names,
//!   run a tool by name.
//! - [`Tool`] + [`ToolSet`] is the stock way to satisfy that contract by
//!   registering individual tools.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::agent::Context;
use crate::error::ToolError;

/// Description of a tool, for display or for handing to a model-backed thinker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema of the tool input.
    pub parameters: serde_json::Value,
}

/// The registry contract consumed by the orchestrator.
#[async_trait]
pub trait ToolRegistry: Send + Sync {
    /// Names of all registered tools.
    fn list_tools(&self) -> Vec<String>;

    /// Run a tool. Fails with [`ToolError::NotFound`] for unknown names.
    async fn run_tool(
        &self,
        name: &str,
        input: serde_json::Value,
        context: Option<&Context>,
    ) -> std::result::Result<serde_json::Value, ToolError>;
}

/// A single capability.
///
/// A result object may carry a `_memory_patch` object; the orchestrator
/// forwards it to memory after the call.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "echo", "get_weather").
    fn name(&self) -> &str;

    /// A description of what this tool does.
    fn description(&self) -> &str;

    /// JSON Schema describing this tool's input.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with the given input.
    async fn execute(
        &self,
        input: serde_json::Value,
        context: Option<&Context>,
    ) -> std::result::Result<serde_json::Value, ToolError>;

    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// A registry of individually registered tools.
pub struct ToolSet {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolSet {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, tool: impl Tool + 'static) -> Self {
        self.register(Box::new(tool));
        self
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// All tool definitions, sorted by name.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<_> = self.tools.values().map(|t| t.to_definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolSet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolRegistry for ToolSet {
    fn list_tools(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    async fn run_tool(
        &self,
        name: &str,
        input: serde_json::Value,
        context: Option<&Context>,
    ) -> std::result::Result<serde_json::Value, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tracing::debug!(tool = name, "Running tool");
        tool.execute(input, context).await
    }
}
