use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use shared::domain::CoffeeShopRecord;

/// Session-lifetime table of logged coffee shops. Append-only: no
/// delete or edit operation exists in this scope.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Push one record onto the end of the table. No uniqueness
    /// constraint; duplicates are allowed.
    async fn append(&self, record: CoffeeShopRecord) -> Result<()>;

    /// The full table in insertion order.
    async fn all(&self) -> Result<Vec<CoffeeShopRecord>>;
}

/// In-memory store, created empty at startup and discarded with the
/// process. Cloning yields another handle to the same table.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    records: Arc<RwLock<Vec<CoffeeShopRecord>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn append(&self, record: CoffeeShopRecord) -> Result<()> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<CoffeeShopRecord>> {
        Ok(self.records.read().await.clone())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
