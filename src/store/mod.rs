pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;

use crate::models::Position;

/// Boundary translating CRUD intents into operations on the opaque
/// key-value table. One contract, implemented by the Postgres store and by
/// the in-memory store the tests run against.
#[async_trait]
pub trait PositionStore: Send + Sync {
    /// Full-table scan. No ordering guarantee, no pagination.
    async fn scan(&self) -> anyhow::Result<Vec<Position>>;

    /// Single-record lookup by id.
    async fn get(&self, id: &str) -> anyhow::Result<Option<Position>>;

    /// Unconditional write keyed by `position.id`, overwriting any existing
    /// record under that key.
    async fn put(&self, position: &Position) -> anyhow::Result<()>;

    /// Rewrite every attribute of an existing record. Returns `None` when no
    /// record exists under `position.id`.
    async fn update(&self, position: &Position) -> anyhow::Result<Option<Position>>;

    /// Remove the record if present. Deleting an unknown id is not an error.
    async fn delete(&self, id: &str) -> anyhow::Result<()>;
}
