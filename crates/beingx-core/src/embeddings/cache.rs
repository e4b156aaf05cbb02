use crate::embeddings::EmbeddingGenerator;
use std::collections::HashMap;

/// Memoizes embedding results keyed by the exact input text.
///
/// The cache grows for the lifetime of the process and is never written to
/// disk. Failed lookups are not cached, so a later request for the same text
/// asks the provider again.
#[derive(Debug, Default)]
pub struct EmbeddingCache {
    entries: HashMap<String, Vec<f32>>,
}

impl EmbeddingCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, text: &str) -> Option<&Vec<f32>> {
        self.entries.get(text)
    }

    pub fn put(&mut self, text: String, embedding: Vec<f32>) {
        self.entries.insert(text, embedding);
    }

    /// Returns the cached embedding for `text`, calling `generator` on a miss.
    ///
    /// `None` means the embedding is unavailable; the provider error has
    /// already been logged.
    pub async fn get_or_compute(
        &mut self,
        text: &str,
        generator: &dyn EmbeddingGenerator,
    ) -> Option<Vec<f32>> {
        if let Some(cached) = self.entries.get(text) {
            log::debug!("Embedding cache hit ({} chars)", text.chars().count());
            return Some(cached.clone());
        }

        log::debug!("Embedding cache miss ({} chars)", text.chars().count());

        match generator.generate_embedding(text).await {
            Ok(embedding) if embedding.is_empty() => {
                log::warn!("Embedding error: provider returned an empty vector");
                None
            }
            Ok(embedding) => {
                self.entries.insert(text.to_string(), embedding.clone());
                Some(embedding)
            }
            Err(e) => {
                log::warn!("Embedding error: {}", e);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
