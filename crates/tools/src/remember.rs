//! Remember tool: stores a value in run memory via a memory patch.

use async_trait::async_trait;
use super_agent_core::agent::Context;
use super_agent_core::error::ToolError;
use super_agent_core::memory::MEMORY_PATCH_KEY;
use super_agent_core::tool::Tool;

pub struct RememberTool;

#[async_trait]
impl Tool for RememberTool {
    fn name(&self) -> &str {
        "remember"
    }

    fn description(&self) -> &str {
        "Store a value in run memory under a key. Later steps see it in the memory snapshot."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "key": { "type": "string" },
                "value": {}
            },
            "required": ["key", "value"]
        })
    }

    async fn execute(
        &self,
        input: serde_json::Value,
        _context: Option<&Context>,
    ) -> Result<serde_json::Value, ToolError> {
        let key = input["key"]
            .as_str()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'key' argument".into()))?;
        let value = input
            .get("value")
            .cloned()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'value' argument".into()))?;

        tracing::debug!(key, "Remembering value");
        let mut patch = serde_json::Map::new();
        patch.insert(key.to_string(), value);

        Ok(serde_json::json!({
            "stored": key,
            MEMORY_PATCH_KEY: patch,
        }))
    }
}
