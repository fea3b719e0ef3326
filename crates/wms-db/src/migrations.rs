//! Schema bootstrap.
//!
//! Embeds the SQL file at compile time. Every statement is `IF NOT EXISTS` /
//! `INSERT OR IGNORE`, so running it against an existing database is a no-op.

use tracing::debug;

use crate::WmsDb;
use crate::error::DatabaseError;

/// Warehouse tables, status names and lookup indexes.
const MIGRATION_001: &str = include_str!("../migrations/001_warehouse.sql");

impl WmsDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_warehouse: {e}")))?;
        debug!("schema 001_warehouse applied");
        Ok(())
    }
}
