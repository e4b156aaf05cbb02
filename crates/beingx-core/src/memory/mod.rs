//! Two-tier conversational memory.
//!
//! Short-term memory keeps the most recent turns verbatim; long-term memory
//! archives substantial utterances together with their embeddings and recalls
//! them by cosine similarity. [`MemoryStore`] owns both tiers and the
//! embedding cache, and writes each tier through to disk after every change.

pub mod long_term;
pub mod persistence;
pub mod short_term;
pub mod vector_math;

pub use long_term::{ArchiveOutcome, LongTermMemory, LtmEntry, MemoryHit, RetentionWeights};
pub use short_term::{ShortTermMemory, StmEntry};

use crate::config::types::MemoryConfig;
use crate::core_types::{Message, Role};
use crate::embeddings::{EmbeddingCache, EmbeddingGenerator};
use crate::errors::AgentError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const STM_FILE_NAME: &str = "stm.json";
pub const LTM_FILE_NAME: &str = "ltm.json";
pub const RECALL_HEADER: &str = "Relevant memories:";

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub stm_count: usize,
    pub ltm_count: usize,
    pub cache_size: usize,
}

pub struct MemoryStore {
    config: MemoryConfig,
    stm: ShortTermMemory,
    ltm: LongTermMemory,
    cache: EmbeddingCache,
    embedder: Arc<dyn EmbeddingGenerator>,
}

impl MemoryStore {
    /// Loads both tiers from `config.data_dir`. Missing or unreadable files
    /// start empty.
    pub async fn open(config: MemoryConfig, embedder: Arc<dyn EmbeddingGenerator>) -> Self {
        let stm = ShortTermMemory::load(config.data_dir.join(STM_FILE_NAME), config.stm_size).await;
        let ltm = LongTermMemory::load(
            config.data_dir.join(LTM_FILE_NAME),
            config.ltm_max_items,
            config.retention_weights(),
        )
        .await;

        log::info!(
            "Opened memory in {} (STM: {}, LTM: {})",
            config.data_dir.display(),
            stm.count(),
            ltm.len()
        );

        Self {
            config,
            stm,
            ltm,
            cache: EmbeddingCache::new(),
            embedder,
        }
    }

    /// A store that never touches the filesystem.
    pub fn in_memory(config: MemoryConfig, embedder: Arc<dyn EmbeddingGenerator>) -> Self {
        let stm = ShortTermMemory::new(config.stm_size);
        let ltm =
            LongTermMemory::new(config.ltm_max_items).with_weights(config.retention_weights());

        Self {
            config,
            stm,
            ltm,
            cache: EmbeddingCache::new(),
            embedder,
        }
    }

    /// Appends `text` to short-term memory and, if it is long enough,
    /// archives it to long-term memory.
    ///
    /// Both tiers are updated before any persistence error is returned, so an
    /// `Err` is a warning about durability, not a lost utterance.
    pub async fn record(&mut self, role: Role, text: &str) -> Result<ArchiveOutcome, AgentError> {
        let stm_result = self.stm.append(role, text).await;

        let archive_result = if text.chars().count() > self.config.min_archive_chars {
            let (tagged, context) = archive_tag(role, text);
            self.ltm
                .add(tagged, context, &mut self.cache, self.embedder.as_ref())
                .await
        } else {
            Ok(ArchiveOutcome::Filtered)
        };

        stm_result?;
        archive_result
    }

    /// Renders long-term memories relevant to `query` for inclusion in a
    /// prompt. Returns an empty string when nothing relevant is stored.
    pub async fn recall(&mut self, query: &str) -> String {
        if self.ltm.is_empty() {
            return String::new();
        }

        let Some(query_embedding) = self
            .cache
            .get_or_compute(query, self.embedder.as_ref())
            .await
        else {
            return String::new();
        };

        let hits = self
            .ltm
            .search(
                &query_embedding,
                self.config.similarity_threshold,
                self.config.ltm_topk,
            )
            .await;

        if hits.is_empty() {
            return String::new();
        }

        log::debug!("Recalled {} long-term memories", hits.len());

        let lines: Vec<String> = hits
            .iter()
            .map(|hit| format!("- {}", hit.entry.text))
            .collect();
        format!("{}\n{}", RECALL_HEADER, lines.join("\n"))
    }

    /// Oldest-first short-term window.
    pub fn window(&self) -> Vec<Message> {
        self.stm.window()
    }

    pub fn stats(&self) -> MemoryStats {
        MemoryStats {
            stm_count: self.stm.count(),
            ltm_count: self.ltm.len(),
            cache_size: self.cache.len(),
        }
    }

    pub async fn clear_short_term(&mut self) -> Result<(), AgentError> {
        self.stm.clear().await
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    pub fn short_term(&self) -> &ShortTermMemory {
        &self.stm
    }

    pub fn long_term(&self) -> &LongTermMemory {
        &self.ltm
    }
}

fn archive_tag(role: Role, text: &str) -> (String, String) {
    let context = match role {
        Role::User => "user_input",
        Role::Assistant => "assistant_response",
        Role::System => "system_note",
    };
    (format!("[{}] {}", role.as_str(), text), context.to_string())
}
