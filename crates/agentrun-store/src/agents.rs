//! Agent CRUD.

use chrono::Utc;
use rusqlite::params;
use tracing::info;

use agentrun_protocols::agent::{Agent, AgentDraft};
use agentrun_protocols::error::StoreError;

use crate::store::{timestamp, SqliteStore};

fn agent_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Agent> {
    Ok(Agent {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        owner_id: row.get(3)?,
        provider: row.get(4)?,
        model: row.get(5)?,
        temperature: row.get(6)?,
        base_url: row.get(7)?,
        active: row.get(8)?,
        created_at: timestamp(row, 9)?,
        updated_at: timestamp(row, 10)?,
    })
}

const AGENT_COLUMNS: &str =
    "id, name, description, owner_id, provider, model, temperature, base_url, active, \
     created_at, updated_at";

impl SqliteStore {
    /// Register a new agent.
    pub async fn create_agent(&self, draft: AgentDraft) -> Result<Agent, StoreError> {
        let now = Utc::now();
        let now_str = now.to_rfc3339();

        let id = self
            .conn
            .call({
                let draft = draft.clone();
                let now_str = now_str.clone();
                move |conn| {
                    conn.execute(
                        "INSERT INTO agents (name, description, owner_id, provider, model, \
                         temperature, base_url, active, created_at, updated_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                        params![
                            draft.name,
                            draft.description,
                            draft.owner_id,
                            draft.provider,
                            draft.model,
                            draft.temperature,
                            draft.base_url,
                            draft.active,
                            now_str,
                            now_str,
                        ],
                    )?;
                    Ok(conn.last_insert_rowid())
                }
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        info!(agent_id = id, name = %draft.name, model = %draft.model, "Agent created");

        Ok(Agent {
            id,
            name: draft.name,
            description: draft.description,
            owner_id: draft.owner_id,
            provider: draft.provider,
            model: draft.model,
            temperature: draft.temperature,
            base_url: draft.base_url,
            active: draft.active,
            created_at: now,
            updated_at: now,
        })
    }

    /// Look up an agent by id.
    pub async fn get_agent(&self, id: i64) -> Result<Option<Agent>, StoreError> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(&format!("SELECT {AGENT_COLUMNS} FROM agents WHERE id = ?1"))?;
                match stmt.query_row([id], agent_from_row) {
                    Ok(agent) => Ok(Some(agent)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }

    /// List all agents.
    pub async fn list_agents(&self) -> Result<Vec<Agent>, StoreError> {
        self.conn
            .call(|conn| {
                let mut stmt =
                    conn.prepare(&format!("SELECT {AGENT_COLUMNS} FROM agents ORDER BY id"))?;
                let agents = stmt
                    .query_map([], agent_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(agents)
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }

    /// Replace an agent's configuration. Returns None when the id is unknown.
    pub async fn update_agent(
        &self,
        id: i64,
        draft: AgentDraft,
    ) -> Result<Option<Agent>, StoreError> {
        let now_str = Utc::now().to_rfc3339();

        let updated = self
            .conn
            .call(move |conn| {
                let changed = conn.execute(
                    "UPDATE agents SET name = ?1, description = ?2, owner_id = ?3, \
                     provider = ?4, model = ?5, temperature = ?6, base_url = ?7, \
                     active = ?8, updated_at = ?9 WHERE id = ?10",
                    params![
                        draft.name,
                        draft.description,
                        draft.owner_id,
                        draft.provider,
                        draft.model,
                        draft.temperature,
                        draft.base_url,
                        draft.active,
                        now_str,
                        id,
                    ],
                )?;
                Ok(changed > 0)
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        if !updated {
            return Ok(None);
        }
        self.get_agent(id).await
    }

    /// Remove an agent and, by cascade, its executions and costs.
    pub async fn delete_agent(&self, id: i64) -> Result<bool, StoreError> {
        let deleted = self
            .conn
            .call(move |conn| Ok(conn.execute("DELETE FROM agents WHERE id = ?1", [id])? > 0))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        if deleted {
            info!(agent_id = id, "Agent deleted");
        }
        Ok(deleted)
    }
}
