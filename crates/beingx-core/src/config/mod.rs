//! Configuration module for being-x
//!
//! Configuration is read once at startup from a YAML file and passed down
//! explicitly; nothing in the crate reads it from global state.

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;


use crate::errors::AgentError;
use std::path::Path;

/// Load a configuration from a YAML file
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<BeingConfig, AgentError> {
    ConfigLoader::from_file(path).await
}
