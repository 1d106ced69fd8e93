use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::PositionStore;
use crate::models::Position;

/// In-process store with the same per-key semantics as the table. Backs the
/// integration tests and local development without a database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, Position>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PositionStore for MemoryStore {
    async fn scan(&self) -> anyhow::Result<Vec<Position>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> anyhow::Result<Option<Position>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn put(&self, position: &Position) -> anyhow::Result<()> {
        self.records
            .write()
            .await
            .insert(position.id.clone(), position.clone());
        Ok(())
    }

    async fn update(&self, position: &Position) -> anyhow::Result<Option<Position>> {
        let mut records = self.records.write().await;
        if !records.contains_key(&position.id) {
            return Ok(None);
        }
        records.insert(position.id.clone(), position.clone());
        Ok(Some(position.clone()))
    }

    async fn delete(&self, id: &str) -> anyhow::Result<()> {
        self.records.write().await.remove(id);
        Ok(())
    }
}
