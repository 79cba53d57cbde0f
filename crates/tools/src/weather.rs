//! Weather tool: stub that returns mock weather data.
//!
//! Results are derived from a hash of the location, so the same location
//! always gets the same weather. The summary is also written to run memory
//! under `last_tool_result`, which is what the rule-based thinker looks for
//! before answering.

use async_trait::async_trait;
use serde::Serialize;
use super_agent_core::agent::Context;
use super_agent_core::error::ToolError;
use super_agent_core::memory::MEMORY_PATCH_KEY;
use super_agent_core::tool::Tool;

pub struct WeatherTool;

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Look up current weather conditions for a location. Returns a one-line summary."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "City or place name (default: here)"
                },
                "units": {
                    "type": "string",
                    "enum": ["metric", "imperial"],
                    "default": "imperial"
                }
            }
        })
    }

    async fn execute(
        &self,
        input: serde_json::Value,
        _context: Option<&Context>,
    ) -> Result<serde_json::Value, ToolError> {
        let location = match input.get("location") {
            None | Some(serde_json::Value::Null) => "here",
            Some(v) => v.as_str().ok_or_else(|| {
                ToolError::InvalidArguments("'location' must be a string".into())
            })?,
        };
        let units = input.get("units").and_then(|v| v.as_str()).unwrap_or("imperial");

        let report = mock_weather(location, units);
        tracing::debug!(location, units, conditions = %report.conditions, "Weather looked up");
        let mut result = serde_json::to_value(&report).map_err(|e| ToolError::ExecutionFailed {
            tool_name: self.name().to_string(),
            reason: e.to_string(),
        })?;
        result[MEMORY_PATCH_KEY] = serde_json::json!({ "last_tool_result": report.summary });
        Ok(result)
    }
}

#[derive(Serialize)]
struct WeatherReport {
    location: String,
    temperature: i64,
    units: String,
    conditions: String,
    summary: String,
}

fn mock_weather(location: &str, units: &str) -> WeatherReport {
    let hash: u32 = location
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));

    let conditions = ["Sunny", "Partly cloudy", "Overcast", "Light rain", "Foggy"]
        [(hash as usize / 7) % 5];

    let celsius = (hash % 35) as i64 - 5;
    let (temperature, unit_label) = if units == "metric" {
        (celsius, "C")
    } else {
        (celsius * 9 / 5 + 32, "F")
    };

    WeatherReport {
        location: location.to_string(),
        temperature,
        units: unit_label.to_string(),
        conditions: conditions.to_string(),
        summary: format!("{conditions} and {temperature} degrees."),
    }
}
