//! Wrap-up intent detection

/// Classifies free-text user input as signaling a desire to end the session
///
/// This is an interface, not a fixed algorithm: the default implementation
/// is keyword-based, and a model-backed classifier can stand in behind the
/// application-layer port without touching phase resolution.
pub trait WrapUpDetector: Send + Sync {
    /// Returns `true` when the text signals the user wants to wrap up.
    /// Empty or whitespace-only input is never a wrap-up signal.
    fn detect(&self, text: &str) -> bool;
}

/// Keyword detector: case-insensitive substring match against a phrase list
#[derive(Debug, Clone)]
pub struct KeywordWrapUpDetector {
    phrases: Vec<String>,
}

impl KeywordWrapUpDetector {
    /// Phrases are matched lowercased; the input is lowercased once per call.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(|p| p.into().to_lowercase())
                .collect(),
        }
    }

    /// Extend the default phrase set with operator-configured phrases.
    pub fn with_extra_phrases<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phrases
            .extend(extra.into_iter().map(|p| p.into().to_lowercase()));
        self
    }

    /// Built-in wrap-up phrases: feeling resolved, explicit stop requests.
    pub fn default_phrases() -> &'static [&'static str] {
        &[
            "i feel better",
            "feel a lot better",
            "feel much better",
            "i'm good for now",
            "im good for now",
            "good for now",
            "i feel resolved",
            "feeling resolved",
            "that helps",
            "that helped",
            "this helped",
            "i'm done",
            "im done",
            "i am done",
            "we're done",
            "wrap up",
            "wrap it up",
            "let's stop",
            "lets stop",
            "stop here",
            "that's all",
            "thats all",
            "that is all",
            "no more questions",
            "end the session",
            "end session",
            "nothing else",
        ]
    }
}

impl Default for KeywordWrapUpDetector {
    fn default() -> Self {
        Self::new(Self::default_phrases().iter().copied())
    }
}

impl WrapUpDetector for KeywordWrapUpDetector {
    fn detect(&self, text: &str) -> bool {
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            return false;
        }
        self.phrases.iter().any(|p| text.contains(p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace_are_not_wrap_up() {
        let detector = KeywordWrapUpDetector::default();
        assert!(!detector.detect(""));
        assert!(!detector.detect("   \t\n"));
    }

    #[test]
    fn test_case_insensitive() {
        let detector = KeywordWrapUpDetector::default();
        assert_eq!(
            detector.detect("I'm GOOD for now"),
            detector.detect("i'm good for now")
        );
        assert!(detector.detect("I'm GOOD for now"));
    }

    #[test]
    fn test_resolved_feeling_detected() {
        let detector = KeywordWrapUpDetector::default();
        assert!(detector.detect("I feel a lot better, thank you"));
        assert!(detector.detect("ok let's stop here"));
        assert!(detector.detect("Thanks, I'm done."));
    }

    #[test]
    fn test_ordinary_messages_pass_through() {
        let detector = KeywordWrapUpDetector::default();
        assert!(!detector.detect("My sister keeps inviting my ex to family dinners."));
        assert!(!detector.detect("ok what now"));
        assert!(!detector.detect("What should I do about work?"));
    }

    #[test]
    fn test_extra_phrases() {
        let detector = KeywordWrapUpDetector::default().with_extra_phrases(["Basta"]);
        assert!(detector.detect("ok basta, enough"));
    }
}
