//! Execution and cost record types.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted request/response pair produced by running an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Execution {
    pub id: i64,
    pub agent_id: i64,
    pub input: String,
    pub output: String,
    pub created_at: DateTime<Utc>,
}

/// Monetary cost attached 1:1 to an execution.
///
/// Written in the same transaction as its execution; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionCost {
    pub id: i64,
    pub execution_id: i64,
    /// Denormalized for aggregate queries.
    pub agent_id: i64,
    pub cost: f64,
    pub created_at: DateTime<Utc>,
}

/// One row of the per-agent cost listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRecord {
    pub execution_id: i64,
    pub cost: f64,
    pub created_at: DateTime<Utc>,
}

/// Aggregate cost statistics for one agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostSummary {
    pub total_cost: f64,
    pub average_cost: f64,
    pub executions: i64,
    /// Cost sum keyed by provider tag.
    pub by_provider: HashMap<String, f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_summary_default_is_zeroed() {
        let summary = CostSummary::default();
        assert_eq!(summary.total_cost, 0.0);
        assert_eq!(summary.average_cost, 0.0);
        assert_eq!(summary.executions, 0);
        assert!(summary.by_provider.is_empty());
    }

    #[test]
    fn test_cost_record_serialization() {
        let record = CostRecord {
            execution_id: 7,
            cost: 0.005,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["execution_id"], 7);
        assert_eq!(json["cost"], 0.005);
        assert!(json.get("created_at").is_some());
    }
}
