//! Configuration types for being-x
//!
//! These mirror the YAML layout of `brain.yml`. Every section except `llm`
//! has defaults so a minimal file only needs a model name.

use crate::errors::AgentError;
use crate::memory::RetentionWeights;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeingConfig {
    #[serde(default = "default_goals")]
    pub goals: Vec<String>,
    pub llm: LlmConfig,
    #[serde(default)]
    pub embeddings: EmbeddingConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(default)]
    pub parameters: ModelParameters,
    #[serde(default)]
    pub auth: ApiAuth,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelParameters {
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

/// API key, either inline or looked up from an environment variable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiAuth {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_key_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default)]
    pub provider: EmbeddingBackend,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(default = "default_embedding_dimension")]
    pub dimension: usize,
    #[serde(default = "default_embedding_timeout")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub auth: ApiAuth,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    #[default]
    OpenAI,
    /// OpenAI-compatible endpoint at `api_base`.
    Custom,
    /// Local hash-based vectors; no network, no semantic meaning.
    Simple,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_stm_size")]
    pub stm_size: usize,
    #[serde(default = "default_ltm_max_items")]
    pub ltm_max_items: usize,
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    #[serde(default = "default_ltm_topk")]
    pub ltm_topk: usize,
    /// Utterances with at most this many characters are never archived.
    #[serde(default = "default_min_archive_chars")]
    pub min_archive_chars: usize,
    #[serde(default = "default_access_weight")]
    pub access_weight: f64,
    #[serde(default = "default_recency_weight")]
    pub recency_weight: f64,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl MemoryConfig {
    pub fn retention_weights(&self) -> RetentionWeights {
        RetentionWeights {
            access: self.access_weight,
            recency: self.recency_weight,
        }
    }

    pub fn validate(&self) -> Result<(), AgentError> {
        if self.stm_size == 0 {
            return Err(AgentError::ConfigError(
                "memory.stm_size must be greater than 0".to_string(),
            ));
        }
        if self.ltm_max_items == 0 {
            return Err(AgentError::ConfigError(
                "memory.ltm_max_items must be greater than 0".to_string(),
            ));
        }
        if self.ltm_topk == 0 {
            return Err(AgentError::ConfigError(
                "memory.ltm_topk must be greater than 0".to_string(),
            ));
        }
        if !self.similarity_threshold.is_finite() {
            return Err(AgentError::ConfigError(
                "memory.similarity_threshold must be a finite number".to_string(),
            ));
        }
        if !self.access_weight.is_finite() || !self.recency_weight.is_finite() {
            return Err(AgentError::ConfigError(
                "memory retention weights must be finite numbers".to_string(),
            ));
        }
        Ok(())
    }
}

impl BeingConfig {
    pub fn validate(&self) -> Result<(), AgentError> {
        if self.llm.model.is_empty() {
            return Err(AgentError::ConfigError("LLM model cannot be empty".to_string()));
        }

        if self.embeddings.provider != EmbeddingBackend::Simple
            && self.embeddings.model.is_empty()
        {
            return Err(AgentError::ConfigError("Embedding model cannot be empty".to_string()));
        }

        if self.embeddings.provider == EmbeddingBackend::Custom
            && self.embeddings.api_base.is_none()
        {
            return Err(AgentError::ConfigError(
                "Custom embedding provider requires embeddings.api_base".to_string(),
            ));
        }

        if self.embeddings.dimension == 0 {
            return Err(AgentError::ConfigError(
                "Embedding dimension must be greater than 0".to_string(),
            ));
        }

        self.memory.validate()
    }
}

fn default_goals() -> Vec<String> {
    vec![
        "Learn from every conversation".to_string(),
        "Be genuinely helpful".to_string(),
    ]
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    500
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_embedding_dimension() -> usize {
    1536
}

fn default_embedding_timeout() -> u64 {
    30
}

fn default_stm_size() -> usize {
    20
}

fn default_ltm_max_items() -> usize {
    1000
}

fn default_similarity_threshold() -> f64 {
    0.75
}

fn default_ltm_topk() -> usize {
    3
}

fn default_min_archive_chars() -> usize {
    20
}

fn default_access_weight() -> f64 {
    0.7
}

fn default_recency_weight() -> f64 {
    0.3
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingBackend::default(),
            model: default_embedding_model(),
            api_base: None,
            dimension: default_embedding_dimension(),
            timeout_seconds: default_embedding_timeout(),
            auth: ApiAuth::default(),
        }
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            stm_size: default_stm_size(),
            ltm_max_items: default_ltm_max_items(),
            similarity_threshold: default_similarity_threshold(),
            ltm_topk: default_ltm_topk(),
            min_archive_chars: default_min_archive_chars(),
            access_weight: default_access_weight(),
            recency_weight: default_recency_weight(),
            data_dir: default_data_dir(),
        }
    }
}
