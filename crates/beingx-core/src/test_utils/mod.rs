pub mod mock_openai_server;

pub use mock_openai_server::MockOpenAIServer;

use crate::core_types::{LLMResponse, Message};
use crate::embeddings::EmbeddingGenerator;
use crate::errors::AgentError;
use crate::llm::LLM;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Embedding generator with a fixed text -> vector table and a call counter.
///
/// Unknown texts fail with `EmbeddingError`, which is how tests simulate an
/// unavailable provider.
#[derive(Clone, Default)]
pub struct ScriptedEmbeddingGenerator {
    vectors: HashMap<String, Vec<f32>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedEmbeddingGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: &str, embedding: Vec<f32>) -> Self {
        self.vectors.insert(text.to_string(), embedding);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingGenerator for ScriptedEmbeddingGenerator {
    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| AgentError::EmbeddingError(format!("no vector scripted for '{}'", text)))
    }

    fn embedding_dimension(&self) -> usize {
        self.vectors.values().next().map(Vec::len).unwrap_or(0)
    }
}

/// Chat model that replays queued replies and records every prompt it sees.
/// Once the queue is drained it fails with `LLMError`.
#[derive(Default)]
pub struct MockLLM {
    replies: Mutex<VecDeque<Result<String, AgentError>>>,
    prompts: Mutex<Vec<Vec<Message>>>,
}

impl MockLLM {
    pub fn new(replies: Vec<Result<String, AgentError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<Vec<Message>> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLM for MockLLM {
    async fn generate(&self, messages: Vec<Message>) -> Result<LLMResponse, AgentError> {
        self.prompts.lock().unwrap().push(messages);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AgentError::LLMError("no reply queued".to_string())))?;

        Ok(LLMResponse {
            content: Some(reply),
            finish_reason: Some("stop".to_string()),
            usage: None,
        })
    }
}
