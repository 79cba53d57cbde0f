//! No-op memory: every snapshot is empty, every update is dropped.

use async_trait::async_trait;
use super_agent_core::error::MemoryError;
use super_agent_core::memory::{Memory, MemorySnapshot};

/// A memory that remembers nothing.
pub struct NoopMemory;

#[async_trait]
impl Memory for NoopMemory {
    fn name(&self) -> &str { "none" }

    async fn load(&self) -> Result<MemorySnapshot, MemoryError> {
        Ok(MemorySnapshot::new())
    }

    async fn update(&self, _patch: MemorySnapshot) -> Result<(), MemoryError> {
        Ok(())
    }
}
