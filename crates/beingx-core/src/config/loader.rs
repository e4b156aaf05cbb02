//! Configuration loader for YAML files and environment resolution

use crate::config::types::*;
use crate::errors::AgentError;
use std::env;
use std::path::Path;
use tokio::fs;

const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Configuration loader with environment resolution
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<BeingConfig, AgentError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).await.map_err(|e| {
            AgentError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_str(&content)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse, resolve and validate configuration from a YAML string
    pub fn from_str(content: &str) -> Result<BeingConfig, AgentError> {
        let mut config: BeingConfig = serde_yaml::from_str(content)
            .map_err(|e| AgentError::ConfigError(format!("Failed to parse YAML config: {}", e)))?;

        Self::resolve_environment(&mut config);
        config.validate()?;

        Ok(config)
    }

    fn resolve_environment(config: &mut BeingConfig) {
        Self::resolve_auth(&mut config.llm.auth);
        Self::resolve_auth(&mut config.embeddings.auth);

        // Embeddings default to the chat credentials when none are configured
        if config.embeddings.auth.api_key.is_none() {
            config.embeddings.auth.api_key = config.llm.auth.api_key.clone();
        }
    }

    /// Resolve an API key: inline value, then `api_key_env`, then `OPENAI_API_KEY`.
    fn resolve_auth(auth: &mut ApiAuth) {
        if auth.api_key.is_some() {
            return;
        }

        let env_var = auth.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV);
        match env::var(env_var) {
            Ok(api_key) if !api_key.is_empty() => auth.api_key = Some(api_key),
            _ => log::debug!("No API key found in environment variable {}", env_var),
        }
    }
}
