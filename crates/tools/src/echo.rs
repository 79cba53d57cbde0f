//! Echo tool: hands its input straight back.

use async_trait::async_trait;
use super_agent_core::agent::Context;
use super_agent_core::error::ToolError;
use super_agent_core::tool::Tool;

pub struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Return the input unchanged. Useful for testing tool plumbing."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "additionalProperties": true
        })
    }

    async fn execute(
        &self,
        input: serde_json::Value,
        _context: Option<&Context>,
    ) -> Result<serde_json::Value, ToolError> {
        Ok(serde_json::json!({ "echo": input }))
    }
}
