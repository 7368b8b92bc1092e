//! Configuration loading and raw TOML structures

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileConversationConfig, FileLoggingConfig, FilePersonaConfig, FileProviderConfig,
    FileWrapUpConfig,
};
pub use loader::ConfigLoader;
