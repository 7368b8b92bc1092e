//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Conversion helpers turn them into the immutable domain/application
//! configuration objects handed to the use cases at startup.

use clarity_application::ConversationParams;
use clarity_domain::{KeywordWrapUpDetector, Model, Persona};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Completion provider settings
    pub provider: FileProviderConfig,
    /// Turn policy settings
    pub conversation: FileConversationConfig,
    /// Persona override
    pub persona: FilePersonaConfig,
    /// Wrap-up detection settings
    pub wrapup: FileWrapUpConfig,
    /// Transcript logging settings
    pub logging: FileLoggingConfig,
}

/// `[provider]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of an OpenAI-compatible API.
    pub base_url: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Model identifier; unknown values pass through as custom models.
    pub model: Option<String>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            model: None,
        }
    }
}

/// `[conversation]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConversationConfig {
    /// Maximum assistant turns before the session is forced to close.
    pub max_turns: usize,
    /// Provider call deadline in seconds; 0 disables the timeout.
    pub provider_timeout_secs: u64,
}

impl Default for FileConversationConfig {
    fn default() -> Self {
        Self {
            max_turns: 8,
            provider_timeout_secs: 60,
        }
    }
}

/// `[persona]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePersonaConfig {
    /// Replaces the built-in coach persona when set.
    pub system_prompt: Option<String>,
}

/// `[wrapup]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWrapUpConfig {
    /// Phrases added to the built-in wrap-up set.
    pub extra_phrases: Vec<String>,
    /// Classify wrap-up intent with the model instead of keywords.
    pub use_model_classifier: bool,
}

/// `[logging]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for JSONL conversation transcripts; disabled when unset.
    pub transcript_dir: Option<String>,
}

impl FileConfig {
    /// Validate the configuration, returning human-readable warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.conversation.max_turns == 0 {
            issues.push(
                "conversation.max_turns is 0; treated as 1 (every reply is final)".to_string(),
            );
        }
        if self.provider.base_url.trim().is_empty() {
            issues.push("provider.base_url is empty; completion calls will fail".to_string());
        }
        if self.provider.api_key_env.trim().is_empty() {
            issues.push("provider.api_key_env is empty; requests will be unauthenticated".to_string());
        }

        issues
    }

    /// Model to use: configured value or the default.
    pub fn parse_model(&self) -> Model {
        self.provider
            .model
            .as_deref()
            .map(|s| s.parse().unwrap())
            .unwrap_or_default()
    }

    /// Turn-loop parameters from the `[conversation]` section.
    pub fn conversation_params(&self) -> ConversationParams {
        let timeout = match self.conversation.provider_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        ConversationParams::default()
            .with_max_turns(self.conversation.max_turns)
            .with_provider_timeout(timeout)
    }

    /// Persona from the `[persona]` section, defaulting to the built-in coach.
    pub fn persona(&self) -> Persona {
        match &self.persona.system_prompt {
            Some(prompt) if !prompt.trim().is_empty() => Persona::new(prompt.clone()),
            _ => Persona::default(),
        }
    }

    /// Keyword detector with operator-configured extra phrases.
    pub fn detector(&self) -> KeywordWrapUpDetector {
        KeywordWrapUpDetector::default()
            .with_extra_phrases(self.wrapup.extra_phrases.iter().cloned())
    }

    /// Transcript directory as a path, when configured.
    pub fn transcript_dir(&self) -> Option<PathBuf> {
        self.logging
            .transcript_dir
            .as_deref()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    }
}
