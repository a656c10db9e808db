//! Bounded per-agent conversational memory.
//!
//! An explicit service object injected wherever history is needed; there is
//! no ambient global. Each agent owns an ordered sequence of interactions,
//! most recent first, truncated to a configured limit, with optional
//! whole-key expiry that resets on every write.

mod store;

pub use store::{MemoryStore, MemoryStoreConfig};
