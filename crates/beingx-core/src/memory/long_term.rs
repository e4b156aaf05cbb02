use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::embeddings::{EmbeddingCache, EmbeddingGenerator};
use crate::errors::AgentError;
use crate::memory::vector_math::cosine_similarity;
use crate::memory::{now_millis, persistence};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LtmEntry {
    pub text: String,
    /// Free-form tag describing where the text came from, e.g. `user_input`.
    pub context: String,
    pub embedding: Vec<f32>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(default)]
    pub access_count: u64,
}

impl LtmEntry {
    pub fn new(text: String, context: String, embedding: Vec<f32>) -> Self {
        Self {
            text,
            context,
            embedding,
            timestamp: now_millis(),
            access_count: 0,
        }
    }
}

/// Weights of the retention score `access * access_count + recency * timestamp`.
///
/// The timestamp is an unnormalized millisecond epoch, so with the default
/// weights recency dominates unless access counts differ enormously.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetentionWeights {
    pub access: f64,
    pub recency: f64,
}

impl Default for RetentionWeights {
    fn default() -> Self {
        Self {
            access: 0.7,
            recency: 0.3,
        }
    }
}

impl RetentionWeights {
    pub fn score(&self, entry: &LtmEntry) -> f64 {
        self.access * entry.access_count as f64 + self.recency * entry.timestamp as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// A new long-term entry was created.
    Stored,
    /// The embedding was unavailable, nothing was archived.
    Skipped,
    /// The text did not pass the archiving filter.
    Filtered,
}

#[derive(Debug, Clone)]
pub struct MemoryHit {
    pub entry: LtmEntry,
    pub similarity: f64,
}

pub struct LongTermMemory {
    entries: Vec<LtmEntry>,
    max_items: usize,
    weights: RetentionWeights,
    file_path: Option<PathBuf>,
}

impl LongTermMemory {
    pub fn new(max_items: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_items,
            weights: RetentionWeights::default(),
            file_path: None,
        }
    }

    pub fn with_weights(mut self, weights: RetentionWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_file_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Restores the store from `path`, evicting down to `max_items` if needed.
    pub async fn load<P: Into<PathBuf>>(
        path: P,
        max_items: usize,
        weights: RetentionWeights,
    ) -> Self {
        let path = path.into();
        let mut store = Self {
            entries: persistence::load_entries(&path).await,
            max_items,
            weights,
            file_path: Some(path),
        };
        store.evict_if_needed();
        store
    }

    /// Embeds `text` through `cache` and archives it.
    ///
    /// An unavailable embedding is not an error: the call returns
    /// [`ArchiveOutcome::Skipped`]. `Err` only reports a failed write, after the
    /// in-memory store was already updated.
    pub async fn add(
        &mut self,
        text: String,
        context: String,
        cache: &mut EmbeddingCache,
        generator: &dyn EmbeddingGenerator,
    ) -> Result<ArchiveOutcome, AgentError> {
        let Some(embedding) = cache.get_or_compute(&text, generator).await else {
            log::warn!(
                "Skipping long-term archive of {} chars: embedding unavailable",
                text.chars().count()
            );
            return Ok(ArchiveOutcome::Skipped);
        };

        self.insert(LtmEntry::new(text, context, embedding));
        self.save().await?;
        Ok(ArchiveOutcome::Stored)
    }

    pub(crate) fn insert(&mut self, entry: LtmEntry) {
        if let Some(existing) = self.entries.first() {
            if existing.embedding.len() != entry.embedding.len() {
                log::warn!(
                    "Archiving embedding of dimension {} next to entries of dimension {}; \
                     mismatched entries are never compared",
                    entry.embedding.len(),
                    existing.embedding.len()
                );
            }
        }
        self.entries.push(entry);
        self.evict_if_needed();
    }

    fn evict_if_needed(&mut self) {
        if self.entries.len() <= self.max_items {
            return;
        }

        let weights = self.weights;
        let before = self.entries.len();
        self.entries
            .sort_by(|a, b| weights.score(b).total_cmp(&weights.score(a)));
        self.entries.truncate(self.max_items);

        log::debug!(
            "Evicted {} long-term entries, {} remaining",
            before - self.entries.len(),
            self.entries.len()
        );
    }

    /// Returns up to `top_k` entries with similarity strictly above
    /// `threshold`, best first. Equal similarities keep collection order.
    ///
    /// Every returned entry has its access count bumped and the store is
    /// written back, so recall strengthens retention.
    pub async fn search(
        &mut self,
        query_embedding: &[f32],
        threshold: f64,
        top_k: usize,
    ) -> Vec<MemoryHit> {
        let mut scored: Vec<(usize, f64)> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.embedding.len() == query_embedding.len())
            .map(|(index, entry)| (index, cosine_similarity(query_embedding, &entry.embedding)))
            .filter(|(_, similarity)| *similarity > threshold)
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(top_k);

        if scored.is_empty() {
            return Vec::new();
        }

        for (index, _) in &scored {
            self.entries[*index].access_count += 1;
        }

        if let Err(e) = self.save().await {
            log::warn!("Failed to persist long-term access counts: {}", e);
        }

        scored
            .into_iter()
            .map(|(index, similarity)| MemoryHit {
                entry: self.entries[index].clone(),
                similarity,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LtmEntry] {
        &self.entries
    }

    async fn save(&self) -> Result<(), AgentError> {
        match &self.file_path {
            Some(path) => persistence::save_entries(path, &self.entries).await,
            None => Ok(()),
        }
    }
}
