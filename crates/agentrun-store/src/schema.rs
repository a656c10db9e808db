//! Database schema.

use rusqlite::Connection;

/// Initialize the schema on a fresh or existing database.
///
/// Foreign keys must be enabled per connection for execution deletion to
/// cascade into `execution_costs`.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS agents (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            description TEXT,
            owner_id    INTEGER,
            provider    TEXT NOT NULL DEFAULT 'ollama',
            model       TEXT NOT NULL,
            temperature REAL,
            base_url    TEXT,
            active      INTEGER NOT NULL DEFAULT 1,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_agents_active ON agents(active);

        CREATE TABLE IF NOT EXISTS executions (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            agent_id   INTEGER NOT NULL REFERENCES agents(id) ON DELETE CASCADE,
            input      TEXT NOT NULL,
            output     TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_executions_agent ON executions(agent_id);

        CREATE TABLE IF NOT EXISTS execution_costs (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            execution_id INTEGER NOT NULL REFERENCES executions(id) ON DELETE CASCADE,
            agent_id     INTEGER NOT NULL,
            cost         REAL NOT NULL CHECK (cost >= 0.0),
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_execution_costs_agent ON execution_costs(agent_id);
        ",
    )
}
