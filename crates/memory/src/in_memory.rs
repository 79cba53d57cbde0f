//! In-memory store: the default run memory.

use async_trait::async_trait;
use super_agent_core::error::MemoryError;
use super_agent_core::memory::{Memory, MemorySnapshot};
use tokio::sync::RwLock;
use tracing::debug;

/// A JSON object kept in process memory.
///
/// `update` is a shallow merge: keys in the patch overwrite existing keys,
/// everything else is left as is. Access goes through an async `RwLock`, so
/// one store can be shared across concurrent runs.
pub struct InMemoryStore {
    entries: RwLock<MemorySnapshot>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::seeded(MemorySnapshot::new())
    }

    /// Start from existing contents.
    pub fn seeded(entries: MemorySnapshot) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Number of top-level keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop all contents.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Memory for InMemoryStore {
    fn name(&self) -> &str { "in_memory" }

    async fn load(&self) -> Result<MemorySnapshot, MemoryError> {
        Ok(self.entries.read().await.clone())
    }

    async fn update(&self, patch: MemorySnapshot) -> Result<(), MemoryError> {
        let mut entries = self.entries.write().await;
        debug!(keys = patch.len(), "Applying memory patch");
        entries.extend(patch);
        Ok(())
    }
}
