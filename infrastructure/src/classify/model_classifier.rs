//! Model-backed wrap-up intent classification.
//!
//! Delegates the yes/no verdict to the completion provider with a
//! constrained instruction. Classification never fails a turn: any provider
//! error degrades to the rule-based keyword detector.

use async_trait::async_trait;
use clarity_application::{CompletionGateway, IntentClassifier};
use clarity_domain::{KeywordWrapUpDetector, Message, Model, WrapUpDetector};
use std::sync::Arc;
use tracing::warn;

const CLASSIFIER_INSTRUCTION: &str = r#"You are a classifier. Decide whether the
user's message signals that they feel resolved or want to end the conversation.
Answer with exactly one word: yes or no."#;

/// Wrap-up classifier that asks the model, falling back to keywords.
pub struct ModelIntentClassifier {
    gateway: Arc<dyn CompletionGateway>,
    model: Model,
    fallback: KeywordWrapUpDetector,
}

impl ModelIntentClassifier {
    pub fn new(gateway: Arc<dyn CompletionGateway>, model: Model) -> Self {
        Self {
            gateway,
            model,
            fallback: KeywordWrapUpDetector::default(),
        }
    }

    pub fn with_fallback(mut self, fallback: KeywordWrapUpDetector) -> Self {
        self.fallback = fallback;
        self
    }
}

#[async_trait]
impl IntentClassifier for ModelIntentClassifier {
    async fn is_wrap_up(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        let messages = vec![Message::system(CLASSIFIER_INSTRUCTION), Message::user(text)];
        match self.gateway.complete(&self.model, &messages).await {
            Ok(reply) => reply.trim().to_lowercase().starts_with("yes"),
            Err(e) => {
                warn!(error = %e, "Intent classification failed; using keyword fallback");
                self.fallback.detect(text)
            }
        }
    }
}
