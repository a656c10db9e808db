//! Agent execution orchestrator.
//!
//! One run is a single-attempt pipeline: build the prompt from memory, drive
//! the provider's chunk stream while forwarding each token to the caller,
//! then (only after the stream completed cleanly) compute the cost, persist
//! execution+cost atomically, update memory, and emit the final summary
//! event. Any failure mid-stream terminates the run with one `error` event
//! and leaves no durable trace.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error, warn};

use agentrun_memory::MemoryStore;
use agentrun_protocols::agent::Agent;
use agentrun_protocols::error::{ProviderError, StoreError};
use agentrun_protocols::event::RunEvent;
use agentrun_protocols::provider::{GenerationRequest, UsageSnapshot};
use agentrun_store::SqliteStore;

use crate::cost;
use crate::prompt::build_prompt;
use crate::registry::ProviderRegistry;

/// Bounded queue between the provider-pull task and the caller-facing
/// stream. Small enough that an abandoned caller is noticed quickly.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// What ended a run early.
#[derive(Debug)]
enum RunFailure {
    Provider(ProviderError),
    Persistence(StoreError),
}

impl RunFailure {
    /// The caller-facing message. Authentication and quota problems get
    /// specific texts; everything else stays generic with the detail kept
    /// server-side.
    fn user_message(&self) -> String {
        match self {
            Self::Provider(ProviderError::Unsupported(name)) => {
                format!("Provider {name} is not supported")
            }
            Self::Provider(ProviderError::AuthenticationFailed(_)) => {
                "Provider rejected the configured credentials".to_string()
            }
            Self::Provider(ProviderError::RateLimited(_)) => {
                "Provider rate limit or quota exhausted".to_string()
            }
            Self::Provider(_) => "The provider failed while generating the response".to_string(),
            Self::Persistence(_) => {
                "The answer was generated but could not be recorded".to_string()
            }
        }
    }
}

/// Orchestrates streaming agent executions.
pub struct AgentRunner {
    providers: Arc<ProviderRegistry>,
    store: Arc<SqliteStore>,
    memory: Arc<MemoryStore>,
}

impl AgentRunner {
    pub fn new(
        providers: Arc<ProviderRegistry>,
        store: Arc<SqliteStore>,
        memory: Arc<MemoryStore>,
    ) -> Self {
        Self {
            providers,
            store,
            memory,
        }
    }

    /// Run an agent against one input, streaming events to the caller.
    ///
    /// Tokens are emitted in exactly the order the provider produced them,
    /// each one sent before the next chunk is pulled. The stream ends with
    /// exactly one `end` event on success or one `error` event on failure.
    pub fn run_stream(&self, agent: Agent, input: String) -> ReceiverStream<RunEvent> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let providers = self.providers.clone();
        let store = self.store.clone();
        let memory = self.memory.clone();

        tokio::spawn(async move {
            if let Err(failure) = drive(providers, store, memory, &agent, &input, &tx).await {
                match &failure {
                    RunFailure::Provider(ProviderError::Unsupported(name)) => {
                        warn!(agent_id = agent.id, provider = %name, "Unsupported provider requested");
                    }
                    RunFailure::Provider(e @ ProviderError::AuthenticationFailed(_))
                    | RunFailure::Provider(e @ ProviderError::RateLimited(_)) => {
                        warn!(agent_id = agent.id, error = %e, "Provider refused the run");
                    }
                    RunFailure::Provider(e) => {
                        error!(agent_id = agent.id, error = %e, "Provider failed mid-run");
                    }
                    RunFailure::Persistence(e) => {
                        // Tokens were already delivered; the run finished but
                        // cannot be recorded.
                        error!(agent_id = agent.id, error = %e, "Recording a completed run failed");
                    }
                }
                let _ = tx.send(RunEvent::error(failure.user_message())).await;
            }
        });

        ReceiverStream::new(rx)
    }
}

/// The pipeline body. Returns Ok(()) both on full success and when the
/// caller disconnected (nothing left to tell anyone).
async fn drive(
    providers: Arc<ProviderRegistry>,
    store: Arc<SqliteStore>,
    memory: Arc<MemoryStore>,
    agent: &Agent,
    input: &str,
    tx: &mpsc::Sender<RunEvent>,
) -> Result<(), RunFailure> {
    let provider = providers
        .resolve(&agent.provider)
        .map_err(RunFailure::Provider)?;

    let history = memory.list(agent.id);
    let prompt = build_prompt(&history, input);

    let mut request = GenerationRequest::new(&agent.model, prompt)
        .with_temperature(agent.temperature.unwrap_or(0.0));
    if let Some(base_url) = &agent.base_url {
        request = request.with_base_url(base_url);
    }

    let mut stream = provider
        .stream_generate(request)
        .await
        .map_err(RunFailure::Provider)?;

    let mut answer = String::new();
    let mut usage: Option<UsageSnapshot> = None;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(RunFailure::Provider)?;
        answer.push_str(&chunk.text);
        if chunk.usage.is_some() {
            usage = chunk.usage;
        }
        if tx.send(RunEvent::token(chunk.text)).await.is_err() {
            debug!(agent_id = agent.id, "Caller disconnected mid-stream; abandoning run");
            return Ok(());
        }
    }

    // Only reached after a clean stream: side effects start here.
    let cost = cost::estimate(&agent.provider, &agent.model, &answer, usage.as_ref());
    let execution = store
        .create_execution(agent, input, &answer, cost)
        .await
        .map_err(RunFailure::Persistence)?;

    memory.append(agent.id, input, answer.clone());
    let retained = memory.list(agent.id);

    let _ = tx
        .send(RunEvent::End {
            answer,
            memory: retained,
            cost,
            agent_name: agent.name.clone(),
            provider: agent.provider.clone(),
            model: agent.model.clone(),
            execution_id: execution.id,
        })
        .await;

    Ok(())
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
