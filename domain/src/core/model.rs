//! Model value object representing an LLM model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Available LLM models (Value Object)
///
/// The reflection flow runs against a single completion provider; the
/// default is a small, fast model since replies are short and frequent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // GPT models
    Gpt52,
    Gpt5,
    Gpt5Mini,
    Gpt41,
    // Claude models
    ClaudeSonnet45,
    ClaudeHaiku45,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt52 => "gpt-5.2",
            Model::Gpt5 => "gpt-5",
            Model::Gpt5Mini => "gpt-5-mini",
            Model::Gpt41 => "gpt-4.1",
            Model::ClaudeSonnet45 => "claude-sonnet-4.5",
            Model::ClaudeHaiku45 => "claude-haiku-4.5",
            Model::Custom(s) => s,
        }
    }
}

impl Default for Model {
    /// Returns the default model (GPT-5-mini)
    fn default() -> Self {
        Model::Gpt5Mini
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    /// Known identifiers match case-insensitively; anything else passes
    /// through verbatim as a custom model.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.to_ascii_lowercase().as_str() {
            "gpt-5.2" => Model::Gpt52,
            "gpt-5" => Model::Gpt5,
            "gpt-5-mini" => Model::Gpt5Mini,
            "gpt-4.1" => Model::Gpt41,
            "claude-sonnet-4.5" => Model::ClaudeSonnet45,
            "claude-haiku-4.5" => Model::ClaudeHaiku45,
            _ => Model::Custom(s.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        let models = vec![Model::Gpt5Mini, Model::Gpt52, Model::ClaudeHaiku45];
        for model in models {
            let s = model.to_string();
            let parsed: Model = s.parse().unwrap();
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "llama-3.3-70b".parse().unwrap();
        assert_eq!(model, Model::Custom("llama-3.3-70b".to_string()));
        assert_eq!(model.to_string(), "llama-3.3-70b");
    }

    #[test]
    fn test_parse_is_case_insensitive_for_known_ids() {
        let model: Model = " GPT-5-Mini ".parse().unwrap();
        assert_eq!(model, Model::Gpt5Mini);
    }

    #[test]
    fn test_model_default() {
        assert_eq!(Model::default(), Model::Gpt5Mini);
    }
}
