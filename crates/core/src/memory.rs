//! Memory trait: the run's scratch state, read before every decision.
//!
//! The orchestrator only ever does two things with memory:
//! - `load()` a snapshot at the top of each loop iteration
//! - `update(patch)` when a tool result carries a memory patch
//!
//! Thinkers get the same handle and may read it as often as they like.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::MemoryError;

/// A point-in-time copy of memory contents.
pub type MemorySnapshot = Map<String, Value>;

/// Key under which a tool result carries its memory patch.
pub const MEMORY_PATCH_KEY: &str = "_memory_patch";

/// The core Memory trait.
///
/// Implementations: in-memory (default), none (no-op).
/// Shared instances must serialize concurrent updates themselves.
#[async_trait]
pub trait Memory: Send + Sync {
    /// The backend name (e.g., "in_memory", "none").
    fn name(&self) -> &str;

    /// Take a snapshot of the current contents.
    async fn load(&self) -> std::result::Result<MemorySnapshot, MemoryError>;

    /// Merge a partial update into memory.
    async fn update(&self, patch: MemorySnapshot) -> std::result::Result<(), MemoryError>;
}

/// Extract the memory patch from a tool result, if it carries a non-empty one.
pub fn memory_patch(result: &Value) -> Option<&MemorySnapshot> {
    result
        .get(MEMORY_PATCH_KEY)
        .and_then(Value::as_object)
        .filter(|patch| !patch.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patch_is_found_on_object_results() {
        let result = json!({"weather": "sunny", "_memory_patch": {"last_tool_result": "sunny"}});
        let patch = memory_patch(&result).unwrap();
        assert_eq!(patch["last_tool_result"], "sunny");
    }

    #[test]
    fn empty_or_malformed_patches_are_ignored() {
        assert!(memory_patch(&json!({"_memory_patch": {}})).is_none());
        assert!(memory_patch(&json!({"_memory_patch": "nope"})).is_none());
        assert!(memory_patch(&json!({"ok": true})).is_none());
        assert!(memory_patch(&json!("plain string")).is_none());
    }
}
