use crate::embeddings::EmbeddingGenerator;
use crate::errors::AgentError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RestEmbeddingConfig {
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub model_name: String,
    pub embedding_dimension: usize,
    pub timeout_seconds: u64,
    pub provider: EmbeddingProvider,
}

impl Default for RestEmbeddingConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model_name: "text-embedding-3-small".to_string(),
            embedding_dimension: 1536,
            timeout_seconds: 30,
            provider: EmbeddingProvider::OpenAI,
        }
    }
}

/// Supported embedding providers
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddingProvider {
    OpenAI,
    /// Any endpoint speaking the OpenAI `/embeddings` format; the key is optional.
    Custom,
}

pub struct RestEmbeddingClient {
    client: Client,
    config: RestEmbeddingConfig,
}

impl RestEmbeddingClient {
    pub fn new(config: RestEmbeddingConfig) -> Result<Self, AgentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AgentError::EmbeddingError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RestEmbeddingConfig {
        &self.config
    }

    async fn call_embeddings_api(&self, text: &str) -> Result<Vec<f32>, AgentError> {
        if text.trim().is_empty() {
            return Err(AgentError::EmbeddingError(
                "No valid text provided for embedding".to_string(),
            ));
        }

        let url = format!("{}/embeddings", self.config.api_base_url.trim_end_matches('/'));

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");

        match (&self.config.provider, &self.config.api_key) {
            (_, Some(api_key)) => {
                request = request.header("Authorization", format!("Bearer {}", api_key));
            }
            (EmbeddingProvider::OpenAI, None) => {
                return Err(AgentError::EmbeddingError(
                    "OpenAI API key not configured".to_string(),
                ));
            }
            (EmbeddingProvider::Custom, None) => {}
        }

        let payload = json!({
            "model": self.config.model_name,
            "input": [text],
            "encoding_format": "float"
        });

        let response = request.json(&payload).send().await.map_err(|e| {
            AgentError::EmbeddingError(format!("Embeddings API request failed: {}", e))
        })?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| AgentError::EmbeddingError(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(AgentError::EmbeddingError(format!(
                "Embeddings API error ({}): {}",
                status, response_text
            )));
        }

        let response_data: OpenAIEmbeddingResponse = serde_json::from_str(&response_text)
            .map_err(|e| {
                AgentError::EmbeddingError(format!("Failed to parse embeddings response: {}", e))
            })?;

        response_data
            .data
            .into_iter()
            .next()
            .map(|item| item.embedding)
            .ok_or_else(|| AgentError::EmbeddingError("No embedding returned from API".to_string()))
    }
}

#[async_trait]
impl EmbeddingGenerator for RestEmbeddingClient {
    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>, AgentError> {
        log::debug!(
            "Requesting embedding from {:?} provider (model {})",
            self.config.provider,
            self.config.model_name
        );
        self.call_embeddings_api(text).await
    }

    fn embedding_dimension(&self) -> usize {
        self.config.embedding_dimension
    }
}

#[derive(Debug, serde::Deserialize)]
struct OpenAIEmbeddingResponse {
    data: Vec<OpenAIEmbeddingItem>,
}

#[derive(Debug, serde::Deserialize)]
struct OpenAIEmbeddingItem {
    embedding: Vec<f32>,
}
