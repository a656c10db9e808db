//! Application state.

use std::sync::Arc;
use std::time::Instant;

use agentrun_core::AgentRunner;
use agentrun_memory::MemoryStore;
use agentrun_store::SqliteStore;

/// Application state shared across handlers.
pub struct AppState {
    pub store: Arc<SqliteStore>,
    pub memory: Arc<MemoryStore>,
    pub runner: Arc<AgentRunner>,
    start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<SqliteStore>, memory: Arc<MemoryStore>, runner: Arc<AgentRunner>) -> Self {
        Self {
            store,
            memory,
            runner,
            start_time: Instant::now(),
        }
    }

    /// Time since the state was constructed.
    pub fn uptime(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }
}
