//! Conversation parameters — per-turn loop control.
//!
//! [`ConversationParams`] groups the static parameters that control one
//! conversation turn in [`RunTurnUseCase`](crate::use_cases::run_turn::RunTurnUseCase).
//! Constructed once at process start from configuration and passed
//! explicitly; never read from ambient global state.

use clarity_domain::PhasePolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Turn-loop control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationParams {
    /// Maximum assistant turns before the conversation is forced to close.
    pub max_turns: usize,
    /// Deadline for the completion-provider call. `None` disables the
    /// timeout (the transport's own limits still apply).
    pub provider_timeout: Option<Duration>,
}

impl Default for ConversationParams {
    fn default() -> Self {
        Self {
            max_turns: PhasePolicy::DEFAULT_MAX_TURNS,
            provider_timeout: Some(Duration::from_secs(60)),
        }
    }
}

impl ConversationParams {
    // ==================== Builder Methods ====================

    pub fn with_max_turns(mut self, max: usize) -> Self {
        self.max_turns = max;
        self
    }

    pub fn with_provider_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.provider_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ConversationParams::default();
        assert_eq!(params.max_turns, 8);
        assert_eq!(params.provider_timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_builder() {
        let params = ConversationParams::default()
            .with_max_turns(3)
            .with_provider_timeout(None);
        assert_eq!(params.max_turns, 3);
        assert!(params.provider_timeout.is_none());
    }
}
