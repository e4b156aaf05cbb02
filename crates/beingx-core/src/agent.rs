//! The conversational being: routes each line of input either to a slash
//! command or to the cortex.

use crate::commands::Command;
use crate::config::BeingConfig;
use crate::cortex::Cortex;
use crate::embeddings::EmbeddingFactory;
use crate::errors::AgentError;
use crate::llm::LLMFactory;
use crate::memory::{MemoryStats, MemoryStore};

pub struct Being {
    memory: MemoryStore,
    cortex: Cortex,
}

impl Being {
    pub fn new(memory: MemoryStore, cortex: Cortex) -> Self {
        let stats = memory.stats();
        log::info!(
            "Memory ready - STM: {}, LTM: {}, Cache: {}",
            stats.stm_count,
            stats.ltm_count,
            stats.cache_size
        );
        Self { memory, cortex }
    }

    /// Wires providers, memory and cortex together from a loaded config.
    pub async fn from_config(config: &BeingConfig) -> Result<Self, AgentError> {
        let embedder = EmbeddingFactory::create_from_config(&config.embeddings)?;
        let llm = LLMFactory::create_llm_with_config(&config.llm)?;

        let memory = MemoryStore::open(config.memory.clone(), embedder).await;
        let cortex = Cortex::new(llm, config.goals.clone());

        Ok(Self::new(memory, cortex))
    }

    /// Returns the text to show for `input`, or `None` for blank input.
    pub async fn handle_input(&mut self, input: &str) -> Option<String> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }

        if let Some(command) = Command::parse(text) {
            log::debug!("Executing command {:?}", command);
            return Some(command.execute(&mut self.memory).await);
        }

        Some(self.cortex.respond(&mut self.memory, text).await)
    }

    pub fn stats(&self) -> MemoryStats {
        self.memory.stats()
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }
}
