//! Store handle and row mapping helpers.

use std::path::Path;

use chrono::{DateTime, Utc};
use tokio_rusqlite::Connection;

use agentrun_protocols::error::StoreError;

use crate::schema::init_schema;

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

/// SQLite-backed store for agents, executions, and costs.
pub struct SqliteStore {
    pub(crate) conn: Connection,
}

impl SqliteStore {
    /// Create a new in-memory database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        conn.call(|conn| Ok(init_schema(conn)?))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(Self { conn })
    }

    /// Create a new file-backed database.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(path)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        conn.call(|conn| Ok(init_schema(conn)?))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(Self { conn })
    }
}

/// Read an RFC3339 timestamp column.
pub(crate) fn timestamp(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}
