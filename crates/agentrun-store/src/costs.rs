//! Cost listing and aggregation.

use std::collections::HashMap;

use agentrun_protocols::error::StoreError;
use agentrun_protocols::execution::{CostRecord, CostSummary};

use crate::store::{timestamp, SqliteStore};

impl SqliteStore {
    /// All recorded costs for one agent, in recording order.
    pub async fn list_agent_costs(&self, agent_id: i64) -> Result<Vec<CostRecord>, StoreError> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT execution_id, cost, created_at
                     FROM execution_costs WHERE agent_id = ?1 ORDER BY id",
                )?;
                let records = stmt
                    .query_map([agent_id], |row| {
                        Ok(CostRecord {
                            execution_id: row.get(0)?,
                            cost: row.get(1)?,
                            created_at: timestamp(row, 2)?,
                        })
                    })?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(records)
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }

    /// Total, average, count, and per-provider breakdown for one agent.
    ///
    /// An agent with no recorded executions yields zeroes and an empty map.
    pub async fn summarize_agent_costs(&self, agent_id: i64) -> Result<CostSummary, StoreError> {
        self.conn
            .call(move |conn| {
                let (total_cost, average_cost, executions) = conn.query_row(
                    "SELECT COALESCE(SUM(cost), 0.0), COALESCE(AVG(cost), 0.0), COUNT(id)
                     FROM execution_costs WHERE agent_id = ?1",
                    [agent_id],
                    |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
                )?;

                let mut stmt = conn.prepare(
                    "SELECT a.provider, COALESCE(SUM(c.cost), 0.0)
                     FROM execution_costs c
                     JOIN agents a ON a.id = c.agent_id
                     WHERE c.agent_id = ?1
                     GROUP BY a.provider",
                )?;
                let by_provider = stmt
                    .query_map([agent_id], |row| {
                        Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
                    })?
                    .collect::<rusqlite::Result<HashMap<_, _>>>()?;

                Ok(CostSummary {
                    total_cost,
                    average_cost,
                    executions,
                    by_provider,
                })
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }
}
