use super::*;
use agentrun_protocols::agent::AgentDraft;

fn draft(name: &str, provider: &str) -> AgentDraft {
    AgentDraft {
        name: name.to_string(),
        description: None,
        owner_id: None,
        provider: provider.to_string(),
        model: "gemma:2b".to_string(),
        temperature: Some(0.0),
        base_url: None,
        active: true,
    }
}

async fn store_with_agent() -> (SqliteStore, agentrun_protocols::agent::Agent) {
    let store = SqliteStore::in_memory().await.unwrap();
    let agent = store.create_agent(draft("helper", "ollama")).await.unwrap();
    (store, agent)
}

#[tokio::test]
async fn test_create_and_get_agent() {
    let (store, agent) = store_with_agent().await;
    assert_eq!(agent.id, 1);

    let fetched = store.get_agent(agent.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "helper");
    assert_eq!(fetched.provider, "ollama");
    assert!(fetched.active);
}

#[tokio::test]
async fn test_get_unknown_agent() {
    let store = SqliteStore::in_memory().await.unwrap();
    assert!(store.get_agent(42).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_agents() {
    let (store, _) = store_with_agent().await;
    store.create_agent(draft("second", "openai")).await.unwrap();

    let agents = store.list_agents().await.unwrap();
    assert_eq!(agents.len(), 2);
    assert_eq!(agents[0].name, "helper");
    assert_eq!(agents[1].name, "second");
}

#[tokio::test]
async fn test_update_agent() {
    let (store, agent) = store_with_agent().await;

    let mut updated_draft = draft("renamed", "openai");
    updated_draft.model = "gpt-4o".to_string();
    let updated = store
        .update_agent(agent.id, updated_draft)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "renamed");
    assert_eq!(updated.model, "gpt-4o");

    assert!(store.update_agent(999, draft("x", "ollama")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_agent_cascades() {
    let (store, agent) = store_with_agent().await;
    store
        .create_execution(&agent, "hi", "hello", 0.005)
        .await
        .unwrap();

    assert!(store.delete_agent(agent.id).await.unwrap());
    assert!(store.list_executions(None).await.unwrap().is_empty());
    assert!(store.list_agent_costs(agent.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_execution_records_both_rows() {
    let (store, agent) = store_with_agent().await;

    let execution = store
        .create_execution(&agent, "hi", "hello", 0.005)
        .await
        .unwrap();
    assert_eq!(execution.agent_id, agent.id);
    assert_eq!(execution.output, "hello");

    let fetched = store.get_execution(execution.id).await.unwrap().unwrap();
    assert_eq!(fetched.input, "hi");

    let costs = store.list_agent_costs(agent.id).await.unwrap();
    assert_eq!(costs.len(), 1);
    assert_eq!(costs[0].execution_id, execution.id);
    assert!((costs[0].cost - 0.005).abs() < 1e-12);
}

#[tokio::test]
async fn test_create_execution_rolls_back_on_cost_failure() {
    let (store, agent) = store_with_agent().await;

    // A negative cost violates the CHECK constraint on execution_costs,
    // after the execution row has already been inserted in the same
    // transaction.
    let result = store.create_execution(&agent, "hi", "hello", -1.0).await;
    assert!(result.is_err());

    assert!(store.list_executions(None).await.unwrap().is_empty());
    assert!(store.list_agent_costs(agent.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_executions_newest_first() {
    let (store, agent) = store_with_agent().await;
    let first = store
        .create_execution(&agent, "one", "1", 0.0)
        .await
        .unwrap();
    let second = store
        .create_execution(&agent, "two", "2", 0.0)
        .await
        .unwrap();

    let executions = store.list_executions(None).await.unwrap();
    assert_eq!(executions.len(), 2);
    assert_eq!(executions[0].id, second.id);
    assert_eq!(executions[1].id, first.id);
}

#[tokio::test]
async fn test_list_executions_filtered_by_agent() {
    let (store, agent) = store_with_agent().await;
    let other = store.create_agent(draft("other", "ollama")).await.unwrap();
    store.create_execution(&agent, "a", "1", 0.0).await.unwrap();
    store.create_execution(&other, "b", "2", 0.0).await.unwrap();

    let executions = store.list_executions(Some(agent.id)).await.unwrap();
    assert_eq!(executions.len(), 1);
    assert_eq!(executions[0].input, "a");
}

#[tokio::test]
async fn test_delete_execution_cascades_cost() {
    let (store, agent) = store_with_agent().await;
    let execution = store
        .create_execution(&agent, "hi", "hello", 0.005)
        .await
        .unwrap();

    assert!(store.delete_execution(execution.id).await.unwrap());
    assert!(store.get_execution(execution.id).await.unwrap().is_none());
    assert!(store.list_agent_costs(agent.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_unknown_execution_returns_false() {
    let store = SqliteStore::in_memory().await.unwrap();
    assert!(!store.delete_execution(42).await.unwrap());
}

#[tokio::test]
async fn test_cost_summary() {
    let (store, agent) = store_with_agent().await;
    store.create_execution(&agent, "a", "1", 0.002).await.unwrap();
    store.create_execution(&agent, "b", "2", 0.004).await.unwrap();

    let summary = store.summarize_agent_costs(agent.id).await.unwrap();
    assert_eq!(summary.executions, 2);
    assert!((summary.total_cost - 0.006).abs() < 1e-9);
    assert!((summary.average_cost - 0.003).abs() < 1e-9);
    assert_eq!(summary.by_provider.len(), 1);
    assert!((summary.by_provider["ollama"] - 0.006).abs() < 1e-9);
}

#[tokio::test]
async fn test_cost_summary_empty_agent() {
    let store = SqliteStore::in_memory().await.unwrap();
    let summary = store.summarize_agent_costs(7).await.unwrap();
    assert_eq!(summary.executions, 0);
    assert_eq!(summary.total_cost, 0.0);
    assert_eq!(summary.average_cost, 0.0);
    assert!(summary.by_provider.is_empty());
}

#[tokio::test]
async fn test_file_backed_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agentrun.db");

    {
        let store = SqliteStore::open(&path).await.unwrap();
        store.create_agent(draft("persistent", "ollama")).await.unwrap();
    }

    let store = SqliteStore::open(&path).await.unwrap();
    let agents = store.list_agents().await.unwrap();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0].name, "persistent");
}
