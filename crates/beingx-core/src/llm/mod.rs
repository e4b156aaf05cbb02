//! Chat model abstraction used by the cortex to produce replies.

pub use crate::core_types::{LLMResponse, Message};
use crate::config::LlmConfig;
use crate::errors::AgentError;
use async_trait::async_trait;
use std::sync::Arc;

pub mod openai;

pub use openai::OpenAIClient;

#[async_trait]
pub trait LLM: Send + Sync {
    async fn generate(&self, messages: Vec<Message>) -> Result<LLMResponse, AgentError>;
}

pub struct LLMFactory;

impl LLMFactory {
    /// Create a chat client from configuration. Requires a resolved API key.
    pub fn create_llm_with_config(config: &LlmConfig) -> Result<Arc<dyn LLM>, AgentError> {
        let api_key = config.auth.api_key.clone().ok_or_else(|| {
            AgentError::ConfigError(
                "No API key for the chat model; set llm.auth.api_key or OPENAI_API_KEY".to_string(),
            )
        })?;

        let mut client = OpenAIClient::new(api_key, config.model.clone())
            .with_temperature(config.parameters.temperature)
            .with_max_tokens(config.parameters.max_tokens);

        if let Some(api_base) = &config.api_base {
            client = client.with_api_base(api_base.clone());
        }

        Ok(Arc::new(client))
    }
}
