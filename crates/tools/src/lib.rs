//! Built-in tool implementations for Super Agent.
//!
//! Small, deterministic tools that let the orchestration loop run end to end
//! without network access: echo input back, look up (mock) weather, and
//! write a value into run memory.

pub mod echo;
pub mod remember;
pub mod weather;

use super_agent_core::tool::ToolSet;

pub use echo::EchoTool;
pub use remember::RememberTool;
pub use weather::WeatherTool;

/// Create a tool set with all built-in tools.
pub fn default_registry() -> ToolSet {
    ToolSet::new()
        .with(EchoTool)
        .with(WeatherTool)
        .with(RememberTool)
}
