//! Configuration for AgentRun.
//!
//! TOML files with `${VAR}` environment expansion; every section has
//! serde defaults so an empty file is a valid configuration.

mod error;
mod loader;
mod schema;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{
    Config, DatabaseConfig, LoggingConfig, MemoryConfig, OllamaConfig, OpenAiConfig,
    ProvidersConfig, ServerConfig,
};
