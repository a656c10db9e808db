//! Execution recording and queries.

use chrono::Utc;
use rusqlite::params;
use tracing::{info, warn};

use agentrun_protocols::agent::Agent;
use agentrun_protocols::error::StoreError;
use agentrun_protocols::execution::Execution;

use crate::store::{timestamp, SqliteStore};

fn execution_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Execution> {
    Ok(Execution {
        id: row.get(0)?,
        agent_id: row.get(1)?,
        input: row.get(2)?,
        output: row.get(3)?,
        created_at: timestamp(row, 4)?,
    })
}

impl SqliteStore {
    /// Persist one execution and its cost as a single unit of work.
    ///
    /// Both rows land in one transaction: if either insert fails, neither
    /// is visible afterwards.
    pub async fn create_execution(
        &self,
        agent: &Agent,
        input: &str,
        output: &str,
        cost: f64,
    ) -> Result<Execution, StoreError> {
        let agent_id = agent.id;
        let input = input.to_string();
        let output = output.to_string();
        let now = Utc::now();
        let now_str = now.to_rfc3339();

        let execution = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;

                tx.execute(
                    "INSERT INTO executions (agent_id, input, output, created_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![agent_id, input, output, now_str],
                )?;
                let execution_id = tx.last_insert_rowid();

                tx.execute(
                    "INSERT INTO execution_costs (execution_id, agent_id, cost, created_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![execution_id, agent_id, cost, now_str],
                )?;

                tx.commit()?;

                Ok(Execution {
                    id: execution_id,
                    agent_id,
                    input,
                    output,
                    created_at: now,
                })
            })
            .await
            .map_err(|e| {
                warn!(agent_id, error = %e, "Recording execution failed; transaction rolled back");
                StoreError::Query(e.to_string())
            })?;

        info!(
            execution_id = execution.id,
            agent_id,
            cost,
            "Execution recorded"
        );
        Ok(execution)
    }

    /// Look up an execution by id.
    pub async fn get_execution(&self, id: i64) -> Result<Option<Execution>, StoreError> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, agent_id, input, output, created_at
                     FROM executions WHERE id = ?1",
                )?;
                match stmt.query_row([id], execution_from_row) {
                    Ok(execution) => Ok(Some(execution)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }

    /// List executions newest first, optionally for one agent.
    pub async fn list_executions(
        &self,
        agent_id: Option<i64>,
    ) -> Result<Vec<Execution>, StoreError> {
        self.conn
            .call(move |conn| {
                let executions = match agent_id {
                    Some(agent_id) => {
                        let mut stmt = conn.prepare(
                            "SELECT id, agent_id, input, output, created_at
                             FROM executions WHERE agent_id = ?1
                             ORDER BY created_at DESC, id DESC",
                        )?;
                        stmt.query_map([agent_id], execution_from_row)?
                            .collect::<rusqlite::Result<Vec<_>>>()?
                    }
                    None => {
                        let mut stmt = conn.prepare(
                            "SELECT id, agent_id, input, output, created_at
                             FROM executions ORDER BY created_at DESC, id DESC",
                        )?;
                        stmt.query_map([], execution_from_row)?
                            .collect::<rusqlite::Result<Vec<_>>>()?
                    }
                };
                Ok(executions)
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }

    /// Remove an execution, cascading its cost row. Returns false when the
    /// execution does not exist.
    pub async fn delete_execution(&self, id: i64) -> Result<bool, StoreError> {
        let deleted = self
            .conn
            .call(move |conn| Ok(conn.execute("DELETE FROM executions WHERE id = ?1", [id])? > 0))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        if deleted {
            info!(execution_id = id, "Execution deleted");
        } else {
            warn!(execution_id = id, "Attempted to delete unknown execution");
        }
        Ok(deleted)
    }
}
