//! Error types shared by the memory core and the agent glue around it.
//!
//! Memory is an enhancement to the conversation, never a dependency of it, so
//! most of these variants are reported through the log and degrade to "no
//! memory available". Only configuration errors are expected to stop startup.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AgentError {
    #[error("LLM interaction failed: {0}")]
    LLMError(String),
    #[error("Embedding unavailable: {0}")]
    EmbeddingError(String),
    #[error("Persistence failed for {path}: {message}")]
    PersistenceError { path: String, message: String },
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Parsing error: {0}")]
    ParsingError(String),
}

impl AgentError {
    pub fn persistence(path: impl AsRef<std::path::Path>, message: impl Into<String>) -> Self {
        AgentError::PersistenceError {
            path: path.as_ref().display().to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_error_display() {
        let err = AgentError::persistence("data/stm.json", "disk full");
        assert_eq!(
            err.to_string(),
            "Persistence failed for data/stm.json: disk full"
        );
    }
}
