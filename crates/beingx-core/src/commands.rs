//! Slash commands handled before input reaches the cortex.

use crate::memory::MemoryStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Stats,
    Clear,
    Help,
    Unknown(String),
}

impl Command {
    /// Parses `/name [args...]`. Returns `None` for ordinary conversation.
    pub fn parse(input: &str) -> Option<Command> {
        let rest = input.trim().strip_prefix('/')?;
        let name = rest.split_whitespace().next().unwrap_or("");

        let command = match name.to_lowercase().as_str() {
            "stats" => Command::Stats,
            "clear" => Command::Clear,
            "help" => Command::Help,
            _ => Command::Unknown(name.to_string()),
        };
        Some(command)
    }

    pub async fn execute(&self, memory: &mut MemoryStore) -> String {
        match self {
            Command::Stats => render_stats(memory),
            Command::Clear => {
                if let Err(e) = memory.clear_short_term().await {
                    log::warn!("Failed to persist cleared short-term memory: {}", e);
                }
                "Short-term memory cleared".to_string()
            }
            Command::Help => [
                "Available Commands:",
                "- /stats    - Show memory statistics",
                "- /clear    - Clear short-term memory",
                "- /help     - Show this help",
                "- exit/quit - Shutdown gracefully",
            ]
            .join("\n"),
            Command::Unknown(name) => format!(
                "Unknown command: /{}\nType /help for available commands",
                name
            ),
        }
    }
}

fn render_stats(memory: &MemoryStore) -> String {
    let stats = memory.stats();
    let config = memory.config();
    format!(
        "Memory Stats:\n- STM: {}/{}\n- LTM: {}/{}\n- Embedding Cache: {}",
        stats.stm_count, config.stm_size, stats.ltm_count, config.ltm_max_items, stats.cache_size
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryConfig;
    use crate::core_types::Role;
    use crate::test_utils::ScriptedEmbeddingGenerator;
    use std::sync::Arc;

    fn store() -> MemoryStore {
        let config = MemoryConfig {
            stm_size: 4,
            ltm_max_items: 50,
            ..Default::default()
        };
        MemoryStore::in_memory(config, Arc::new(ScriptedEmbeddingGenerator::new()))
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/stats"), Some(Command::Stats));
        assert_eq!(Command::parse("/STATS"), Some(Command::Stats));
        assert_eq!(Command::parse("/clear now please"), Some(Command::Clear));
        assert_eq!(Command::parse("/help"), Some(Command::Help));
        assert_eq!(
            Command::parse("/dance"),
            Some(Command::Unknown("dance".to_string()))
        );
        assert_eq!(Command::parse("/"), Some(Command::Unknown(String::new())));
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(Command::parse("hello there"), None);
        assert_eq!(Command::parse("a/b"), None);
    }

    #[tokio::test]
    async fn test_stats_output() {
        let mut memory = store();
        memory.record(Role::User, "hi").await.unwrap();

        let output = Command::Stats.execute(&mut memory).await;

        assert!(output.contains("STM: 1/4"));
        assert!(output.contains("LTM: 0/50"));
        assert!(output.contains("Embedding Cache: 0"));
    }

    #[tokio::test]
    async fn test_clear_empties_short_term() {
        let mut memory = store();
        memory.record(Role::User, "hi").await.unwrap();

        let output = Command::Clear.execute(&mut memory).await;

        assert_eq!(output, "Short-term memory cleared");
        assert_eq!(memory.stats().stm_count, 0);
    }

    #[tokio::test]
    async fn test_unknown_command_hints_at_help() {
        let mut memory = store();
        let output = Command::Unknown("dance".to_string())
            .execute(&mut memory)
            .await;
        assert!(output.starts_with("Unknown command: /dance"));
        assert!(output.contains("/help"));
    }
}
