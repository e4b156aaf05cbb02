//! Core of being-x, a conversational agent with two-tier memory.
//!
//! Every utterance lands in a bounded short-term window; substantial ones are
//! also embedded and archived in long-term memory, which is searched by
//! cosine similarity to remind the model of relevant past exchanges.
//!
//! - **Memory**: short-term ring buffer, long-term store with retention-scored
//!   eviction, embedding cache, and the [`MemoryStore`] facade over them
//! - **Embeddings**: provider trait with an OpenAI-compatible REST client
//! - **Language model**: chat client used by the [`cortex::Cortex`]
//! - **Configuration**: YAML `brain.yml` with defaults and validation

pub mod agent;
pub mod commands;
pub mod config;
pub mod core_types;
pub mod cortex;
pub mod embeddings;
pub mod errors;
pub mod llm;
pub mod memory;

pub use agent::Being;
pub use config::*;
pub use cortex::Cortex;
pub use embeddings::{EmbeddingCache, EmbeddingGenerator};
pub use errors::AgentError;
pub use llm::LLM;
pub use memory::{MemoryStats, MemoryStore};

#[cfg(test)]
pub mod test_utils;
