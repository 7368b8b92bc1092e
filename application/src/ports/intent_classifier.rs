//! Wrap-up intent classification port
//!
//! Async seam over the domain [`WrapUpDetector`] so a model-backed
//! classifier can slot in without changing phase resolution. Classification
//! never fails a turn: implementations must degrade to a boolean verdict
//! (typically the rule-based result) rather than surface an error.

use async_trait::async_trait;
use clarity_domain::{KeywordWrapUpDetector, WrapUpDetector};

/// Classifies a user message as a wrap-up signal
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn is_wrap_up(&self, text: &str) -> bool;
}

/// Rule-based classifier wrapping the domain keyword detector
pub struct RuleBasedIntentClassifier {
    detector: KeywordWrapUpDetector,
}

impl RuleBasedIntentClassifier {
    pub fn new(detector: KeywordWrapUpDetector) -> Self {
        Self { detector }
    }
}

impl Default for RuleBasedIntentClassifier {
    fn default() -> Self {
        Self::new(KeywordWrapUpDetector::default())
    }
}

#[async_trait]
impl IntentClassifier for RuleBasedIntentClassifier {
    async fn is_wrap_up(&self, text: &str) -> bool {
        self.detector.detect(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rule_based_delegates_to_detector() {
        let classifier = RuleBasedIntentClassifier::default();
        assert!(classifier.is_wrap_up("I'm good for now, thanks").await);
        assert!(!classifier.is_wrap_up("ok what now").await);
        assert!(!classifier.is_wrap_up("").await);
    }
}
