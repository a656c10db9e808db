//! In-process memory store implementation.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::{debug, info};

use agentrun_protocols::memory::MemoryEntry;

/// Memory store settings.
#[derive(Debug, Clone)]
pub struct MemoryStoreConfig {
    /// Maximum retained interactions per agent.
    pub limit: usize,

    /// Expiry for an agent's whole history; None keeps it indefinitely.
    pub ttl: Option<Duration>,
}

impl Default for MemoryStoreConfig {
    fn default() -> Self {
        Self {
            limit: 5,
            ttl: None,
        }
    }
}

struct AgentHistory {
    entries: VecDeque<MemoryEntry>,
    expires_at: Option<Instant>,
}

impl AgentHistory {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Per-agent bounded interaction history.
///
/// Operations on distinct agent ids are fully independent; operations on the
/// same id are serialized by the map's shard locks.
pub struct MemoryStore {
    histories: DashMap<i64, AgentHistory>,
    limit: usize,
    ttl: Option<Duration>,
}

impl MemoryStore {
    pub fn new(config: MemoryStoreConfig) -> Self {
        Self {
            histories: DashMap::new(),
            limit: config.limit,
            ttl: config.ttl,
        }
    }

    /// The configured per-agent entry limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Record one interaction for an agent.
    ///
    /// The new entry goes to the front; anything beyond the limit is
    /// dropped from the back. Writing resets the expiry clock.
    pub fn append(&self, agent_id: i64, input: impl Into<String>, output: impl Into<String>) {
        debug!(agent_id, "Appending memory entry");
        let mut history = self.histories.entry(agent_id).or_insert_with(|| AgentHistory {
            entries: VecDeque::new(),
            expires_at: None,
        });

        if history.is_expired() {
            history.entries.clear();
        }

        history.entries.push_front(MemoryEntry::new(input, output));
        history.entries.truncate(self.limit);
        history.expires_at = self.ttl.map(|ttl| Instant::now() + ttl);
    }

    /// The retained history for an agent, most recent first.
    ///
    /// Expired or unknown agents yield an empty vec; expired keys are
    /// dropped on the way out.
    pub fn list(&self, agent_id: i64) -> Vec<MemoryEntry> {
        if let Some(history) = self.histories.get(&agent_id) {
            if !history.is_expired() {
                return history.entries.iter().cloned().collect();
            }
        } else {
            return Vec::new();
        }

        self.histories.remove_if(&agent_id, |_, h| h.is_expired());
        Vec::new()
    }

    /// Drop an agent's entire history. Idempotent.
    pub fn clear(&self, agent_id: i64) {
        if self.histories.remove(&agent_id).is_some() {
            info!(agent_id, "Cleared agent memory");
        }
    }

    /// Drop every agent's history.
    pub fn clear_all(&self) {
        info!("Cleared memory for all agents");
        self.histories.clear();
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
