//! Application layer for clarity
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ConversationParams;
pub use ports::{
    completion_gateway::{CompletionGateway, GatewayError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    intent_classifier::{IntentClassifier, RuleBasedIntentClassifier},
    session_store::{SessionStore, SessionSummary, StoreError},
};
pub use use_cases::{
    end_session::{EndSessionError, EndSessionUseCase},
    list_sessions::{ListSessionsError, ListSessionsUseCase},
    run_turn::{RunTurnError, RunTurnInput, RunTurnOutput, RunTurnUseCase},
    session_gate::SessionGate,
    start_session::{StartSessionError, StartSessionUseCase},
};
