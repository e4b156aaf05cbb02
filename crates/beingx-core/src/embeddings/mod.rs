//! Embedding providers and the in-process embedding cache.
//!
//! The memory core only sees the [`EmbeddingGenerator`] trait. Remote
//! providers live in [`rest`]; [`DummyEmbeddingGenerator`] produces
//! deterministic vectors for offline runs and tests.

use crate::config::{EmbeddingBackend, EmbeddingConfig};
use crate::errors::AgentError;
use async_trait::async_trait;
use std::sync::Arc;

pub mod cache;
pub mod rest;

pub use cache::EmbeddingCache;
pub use rest::{EmbeddingProvider, RestEmbeddingClient, RestEmbeddingConfig};

#[async_trait]
pub trait EmbeddingGenerator: Send + Sync {
    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>, AgentError>;

    fn embedding_dimension(&self) -> usize;
}

pub struct DummyEmbeddingGenerator {
    embedding_dimension: usize,
}

impl DummyEmbeddingGenerator {
    pub fn new() -> Self {
        Self {
            embedding_dimension: 384,
        }
    }

    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            embedding_dimension: dimension,
        }
    }
}

impl Default for DummyEmbeddingGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingGenerator for DummyEmbeddingGenerator {
    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>, AgentError> {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let hash = hasher.finish();

        let mut embedding: Vec<f32> = (0..self.embedding_dimension)
            .map(|i| {
                let seed = hash.wrapping_mul(31).wrapping_add(i as u64 * 7919);
                ((seed % 1000) as f32 - 500.0) / 500.0
            })
            .collect();

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for val in &mut embedding {
                *val /= magnitude;
            }
        }

        Ok(embedding)
    }

    fn embedding_dimension(&self) -> usize {
        self.embedding_dimension
    }
}

/// Builds the embedding provider described by the configuration.
pub struct EmbeddingFactory;

impl EmbeddingFactory {
    pub fn create_from_config(
        config: &EmbeddingConfig,
    ) -> Result<Arc<dyn EmbeddingGenerator>, AgentError> {
        match config.provider {
            EmbeddingBackend::Simple => {
                log::info!(
                    "Using local hash embeddings ({} dimensions); recall will not be semantic",
                    config.dimension
                );
                Ok(Arc::new(DummyEmbeddingGenerator::with_dimension(config.dimension)))
            }
            EmbeddingBackend::OpenAI | EmbeddingBackend::Custom => {
                let provider = if config.provider == EmbeddingBackend::OpenAI {
                    EmbeddingProvider::OpenAI
                } else {
                    EmbeddingProvider::Custom
                };
                let defaults = RestEmbeddingConfig::default();
                let rest_config = RestEmbeddingConfig {
                    api_base_url: config.api_base.clone().unwrap_or(defaults.api_base_url),
                    api_key: config.auth.api_key.clone(),
                    model_name: config.model.clone(),
                    embedding_dimension: config.dimension,
                    timeout_seconds: config.timeout_seconds,
                    provider,
                };
                let client = RestEmbeddingClient::new(rest_config)?;
                log::info!(
                    "Using {:?} embeddings ({}, {} dimensions)",
                    client.config().provider,
                    client.config().model_name,
                    client.config().embedding_dimension
                );
                Ok(Arc::new(client))
            }
        }
    }
}
