//! Protocol layer for AgentRun.
//!
//! Defines the domain types shared by every crate in the workspace: agent
//! configurations, execution records, memory entries, the streaming event
//! protocol, the provider contract, and the error taxonomy.

pub mod agent;
pub mod error;
pub mod event;
pub mod execution;
pub mod memory;
pub mod provider;
