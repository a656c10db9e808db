//! AgentRun - streaming LLM agent execution service.
//!
//! Main entry point: loads configuration, wires the store, memory, provider
//! registry, and runner together, and serves the HTTP API.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use agentrun_api::{ApiConfig, ApiServer, AppState};
use agentrun_config::{Config, ConfigLoader, LoggingConfig};
use agentrun_core::{AgentRunner, ProviderRegistry};
use agentrun_memory::{MemoryStore, MemoryStoreConfig};
use agentrun_provider_ollama::OllamaProvider;
use agentrun_provider_openai::OpenAIProvider;
use agentrun_store::SqliteStore;

/// AgentRun CLI.
#[derive(Parser)]
#[command(name = "agentrun")]
#[command(about = "Streaming LLM agent execution service")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/agentrun.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the server in foreground (default)
    Run {
        /// Server host override
        #[arg(long)]
        host: Option<String>,

        /// Server port override
        #[arg(long)]
        port: Option<u16>,
    },
}

fn load_config(path: &PathBuf) -> anyhow::Result<Config> {
    if path.exists() {
        ConfigLoader::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))
    } else {
        Ok(Config::default())
    }
}

/// Initialize tracing. Returns the file appender guard, which must stay
/// alive for the lifetime of the process.
fn init_tracing(config: &LoggingConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr));

    if config.dir.is_empty() {
        registry.init();
        None
    } else {
        let dir = ConfigLoader::expand_path(&config.dir);
        let appender = tracing_appender::rolling::daily(dir, "agentrun.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        registry
            .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
            .init();
        Some(guard)
    }
}

async fn run_server(config: Config, host: String, port: u16) -> anyhow::Result<()> {
    let db_path = ConfigLoader::expand_path(&config.database.path);
    let store = if db_path == ":memory:" {
        SqliteStore::in_memory().await
    } else {
        SqliteStore::open(&db_path).await
    }
    .context("opening database")?;
    let store = Arc::new(store);

    let ttl = (config.memory.ttl_seconds > 0)
        .then(|| Duration::from_secs(config.memory.ttl_seconds));
    let memory = Arc::new(MemoryStore::new(MemoryStoreConfig {
        limit: config.memory.limit,
        ttl,
    }));

    let providers = Arc::new(ProviderRegistry::new());
    providers.register(Arc::new(OllamaProvider::with_base_url(
        config.providers.ollama.base_url.clone(),
    )));
    if config.providers.openai.api_key.is_empty() {
        warn!("No OpenAI API key configured; openai runs will fail authentication");
    }
    let openai = if config.providers.openai.api_url.is_empty() {
        OpenAIProvider::new(config.providers.openai.api_key.clone())
    } else {
        OpenAIProvider::with_url(
            config.providers.openai.api_key.clone(),
            config.providers.openai.api_url.clone(),
        )
    };
    providers.register(Arc::new(openai));
    info!(providers = ?providers.list_ids(), "Providers registered");

    let runner = Arc::new(AgentRunner::new(providers, store.clone(), memory.clone()));
    let state = Arc::new(AppState::new(store, memory, runner));

    let server = ApiServer::new(ApiConfig::new(host, port), state);
    server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("server error: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let _guard = init_tracing(&config.logging);

    let (host, port) = match cli.command {
        Some(Commands::Run { host, port }) => (host, port),
        None => (None, None),
    };
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    run_server(config, host, port).await
}
