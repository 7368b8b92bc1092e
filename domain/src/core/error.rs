//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("An assistant turn must follow a user turn")]
    AssistantTurnOrder,

    #[error("Unknown phase: {0}")]
    UnknownPhase(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_turn_order_display() {
        let error = DomainError::AssistantTurnOrder;
        assert_eq!(
            error.to_string(),
            "An assistant turn must follow a user turn"
        );
    }

    #[test]
    fn test_unknown_phase_display() {
        let error = DomainError::UnknownPhase("midgame".to_string());
        assert_eq!(error.to_string(), "Unknown phase: midgame");
    }
}
