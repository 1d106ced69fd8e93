use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

use super::PositionStore;
use crate::models::{Position, Side};

/// Positions table row. `side` is stored as text and converted at the edge
/// so an unexpected value surfaces as an error instead of a panic.
#[derive(Debug, FromRow)]
struct PositionRow {
    id: String,
    symbol: String,
    quantity: Decimal,
    side: String,
    entry: Decimal,
    date: String,
}

impl TryFrom<PositionRow> for Position {
    type Error = anyhow::Error;

    fn try_from(row: PositionRow) -> Result<Self, Self::Error> {
        Ok(Position {
            id: row.id,
            symbol: row.symbol,
            quantity: row.quantity,
            side: Side::from_str(&row.side)?,
            entry: row.entry,
            date: row.date,
        })
    }
}

/// sqlx-backed store. One row per position, keyed by the generated id.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
    table: String,
}

impl PgStore {
    pub async fn connect(database_url: &str, table: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        // Verify connectivity
        sqlx::query("SELECT 1").execute(&pool).await?;

        let store = Self {
            pool,
            table: table.to_string(),
        };
        store.ensure_table().await?;
        Ok(store)
    }

    async fn ensure_table(&self) -> anyhow::Result<()> {
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id       TEXT PRIMARY KEY,
                symbol   TEXT NOT NULL,
                quantity NUMERIC NOT NULL,
                side     TEXT NOT NULL,
                entry    NUMERIC NOT NULL DEFAULT 0,
                date     TEXT NOT NULL
            )
            "#,
            self.table
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl PositionStore for PgStore {
    async fn scan(&self) -> anyhow::Result<Vec<Position>> {
        let rows: Vec<PositionRow> = sqlx::query_as(&format!(
            "SELECT id, symbol, quantity, side, entry, date FROM {}",
            self.table
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Position::try_from).collect()
    }

    async fn get(&self, id: &str) -> anyhow::Result<Option<Position>> {
        let row: Option<PositionRow> = sqlx::query_as(&format!(
            "SELECT id, symbol, quantity, side, entry, date FROM {} WHERE id = $1",
            self.table
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Position::try_from).transpose()
    }

    async fn put(&self, position: &Position) -> anyhow::Result<()> {
        sqlx::query(&format!(
            r#"
            INSERT INTO {} (id, symbol, quantity, side, entry, date)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE
            SET symbol = $2, quantity = $3, side = $4, entry = $5, date = $6
            "#,
            self.table
        ))
        .bind(&position.id)
        .bind(&position.symbol)
        .bind(position.quantity)
        .bind(position.side.as_str())
        .bind(position.entry)
        .bind(&position.date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, position: &Position) -> anyhow::Result<Option<Position>> {
        let row: Option<PositionRow> = sqlx::query_as(&format!(
            r#"
            UPDATE {}
            SET symbol = $2, quantity = $3, side = $4, entry = $5, date = $6
            WHERE id = $1
            RETURNING id, symbol, quantity, side, entry, date
            "#,
            self.table
        ))
        .bind(&position.id)
        .bind(&position.symbol)
        .bind(position.quantity)
        .bind(position.side.as_str())
        .bind(position.entry)
        .bind(&position.date)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Position::try_from).transpose()
    }

    async fn delete(&self, id: &str) -> anyhow::Result<()> {
        sqlx::query(&format!("DELETE FROM {} WHERE id = $1", self.table))
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
