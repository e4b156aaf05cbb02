//! Turns a user utterance into a reply using recalled memories and the
//! recent conversation window.

use crate::core_types::{Message, Role};
use crate::llm::LLM;
use crate::memory::MemoryStore;
use std::sync::Arc;

pub const FALLBACK_REPLY: &str =
    "I'm having trouble processing that right now. Could you try again?";

const DEFAULT_CONTEXT_TURNS: usize = 10;

const GUIDELINES: &str = "Guidelines:
- Be curious and thoughtful
- Ask follow-up questions when appropriate
- Remember previous context from the conversation
- Show genuine interest in learning and self-improvement";

pub struct Cortex {
    llm: Arc<dyn LLM>,
    goals: Vec<String>,
    context_turns: usize,
}

impl Cortex {
    pub fn new(llm: Arc<dyn LLM>, goals: Vec<String>) -> Self {
        Self {
            llm,
            goals,
            context_turns: DEFAULT_CONTEXT_TURNS,
        }
    }

    pub fn with_context_turns(mut self, context_turns: usize) -> Self {
        self.context_turns = context_turns;
        self
    }

    /// Produces a reply to `text` and records both sides of the exchange.
    ///
    /// Never fails: a model error yields [`FALLBACK_REPLY`], and persistence
    /// errors are logged.
    pub async fn respond(&self, memory: &mut MemoryStore, text: &str) -> String {
        // Recall first so the utterance can't match itself.
        let memories = memory.recall(text).await;

        if let Err(e) = memory.record(Role::User, text).await {
            log::warn!("Failed to record user input: {}", e);
        }

        let mut messages = vec![Message::system(self.system_prompt(&memories))];
        let window = memory.window();
        let start = window.len().saturating_sub(self.context_turns);
        messages.extend(window.into_iter().skip(start));

        let reply = match self.llm.generate(messages).await {
            Ok(response) => match response.content.map(|c| c.trim().to_string()) {
                Some(content) if !content.is_empty() => content,
                _ => {
                    log::error!("Cortex error: model returned no content");
                    FALLBACK_REPLY.to_string()
                }
            },
            Err(e) => {
                log::error!("Cortex error: {}", e);
                FALLBACK_REPLY.to_string()
            }
        };

        if let Err(e) = memory.record(Role::Assistant, &reply).await {
            log::warn!("Failed to record reply: {}", e);
        }

        reply
    }

    fn system_prompt(&self, memories: &str) -> String {
        let mut prompt = format!(
            "You are an AI being with these core goals: {}\n\
             Current context: You're in conversation with a human. \
             Think step by step and respond naturally.\n",
            self.goals.join("; ")
        );
        if !memories.is_empty() {
            prompt.push('\n');
            prompt.push_str(memories);
            prompt.push('\n');
        }
        prompt.push('\n');
        prompt.push_str(GUIDELINES);
        prompt
    }
}
