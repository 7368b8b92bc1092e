//! Run Turn use case.
//!
//! Executes one conversation turn: resolves the phase for the reply,
//! assembles the prompt, calls the completion provider, and persists the
//! exchange.
//!
//! Atomicity policy: nothing is persisted until the provider has replied.
//! A provider failure or timeout leaves the stored history untouched; the
//! caller may retry the whole turn. Turn ids are generated before the first
//! append, so an append retry records the same turn rather than a duplicate.

use crate::config::ConversationParams;
use crate::ports::completion_gateway::{CompletionGateway, GatewayError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::intent_classifier::IntentClassifier;
use crate::ports::session_store::{SessionStore, StoreError};
use crate::use_cases::session_gate::SessionGate;
use clarity_domain::{Model, Persona, Phase, PhasePolicy, PromptAssembler, Turn};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while running a turn.
#[derive(Error, Debug)]
pub enum RunTurnError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Provider timed out")]
    ProviderTimeout,

    #[error("Provider error: {0}")]
    Provider(GatewayError),

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl RunTurnError {
    /// Transient failures may be retried with the same input; the history
    /// was not modified.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RunTurnError::ProviderTimeout | RunTurnError::Provider(_) | RunTurnError::Store(_)
        )
    }
}

impl From<GatewayError> for RunTurnError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Timeout => RunTurnError::ProviderTimeout,
            e => RunTurnError::Provider(e),
        }
    }
}

impl From<StoreError> for RunTurnError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => RunTurnError::NotFound(id),
            e => RunTurnError::Store(e),
        }
    }
}

/// Input for the [`RunTurnUseCase`].
#[derive(Debug, Clone)]
pub struct RunTurnInput {
    /// Session to continue.
    pub session_id: String,
    /// The new user message.
    pub user_text: String,
    /// Model for the completion call.
    pub model: Model,
    /// Persona configuration; immutable for the process lifetime.
    pub persona: Persona,
    /// Turn-loop parameters.
    pub params: ConversationParams,
}

impl RunTurnInput {
    pub fn new(session_id: impl Into<String>, user_text: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            user_text: user_text.into(),
            model: Model::default(),
            persona: Persona::default(),
            params: ConversationParams::default(),
        }
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.persona = persona;
        self
    }

    pub fn with_params(mut self, params: ConversationParams) -> Self {
        self.params = params;
        self
    }
}

/// Result of a completed turn.
#[derive(Debug, Clone)]
pub struct RunTurnOutput {
    /// The assistant reply text.
    pub reply: String,
    /// The phase that governed the reply.
    pub phase: Phase,
    /// Id of the recorded assistant turn.
    pub turn_id: String,
}

/// Use case for running one conversation turn.
///
/// 1. Validate input
/// 2. Serialize on the session's gate
/// 3. Load the session and its history
/// 4. Classify wrap-up intent, resolve the phase
/// 5. Assemble the prompt and call the provider under the timeout
/// 6. On success only: append user turn, then assistant turn; close the
///    session when the phase is closing
pub struct RunTurnUseCase {
    gateway: Arc<dyn CompletionGateway>,
    store: Arc<dyn SessionStore>,
    classifier: Arc<dyn IntentClassifier>,
    gate: Arc<SessionGate>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl RunTurnUseCase {
    pub fn new(
        gateway: Arc<dyn CompletionGateway>,
        store: Arc<dyn SessionStore>,
        classifier: Arc<dyn IntentClassifier>,
    ) -> Self {
        Self {
            gateway,
            store,
            classifier,
            gate: Arc::new(SessionGate::new()),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a transcript logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Share a gate with other use cases touching the same store.
    pub fn with_gate(mut self, gate: Arc<SessionGate>) -> Self {
        self.gate = gate;
        self
    }

    /// Execute one turn.
    pub async fn execute(&self, input: RunTurnInput) -> Result<RunTurnOutput, RunTurnError> {
        let session_id = input.session_id.trim();
        if session_id.is_empty() {
            return Err(RunTurnError::Validation("session id is empty".to_string()));
        }
        if input.user_text.trim().is_empty() {
            return Err(RunTurnError::Validation("message is empty".to_string()));
        }

        let lock = self.gate.lock_for(session_id).await;
        let _guard = lock.lock().await;

        let session = self.store.get_session(session_id).await?;
        let history = self.store.list_turns(session_id).await?;

        let wrap_up = self.classifier.is_wrap_up(&input.user_text).await;
        let assistant_turns = history.iter().filter(|t| t.is_assistant()).count();
        let policy = PhasePolicy::new(input.params.max_turns);
        let phase = policy.resolve(assistant_turns, wrap_up, session.is_closed());

        debug!(
            session = session_id,
            %phase,
            assistant_turns,
            wrap_up,
            "Resolved phase for next reply"
        );

        let messages =
            PromptAssembler::assemble(&input.persona, phase, &history, &input.user_text);

        let completion = self.gateway.complete(&input.model, &messages);
        let reply = match input.params.provider_timeout {
            Some(deadline) => tokio::time::timeout(deadline, completion)
                .await
                .map_err(|_| RunTurnError::ProviderTimeout)??,
            None => completion.await?,
        };

        // Persist only now that the provider replied; a failure above left
        // the history untouched.
        let user_turn = Turn::user(&input.user_text);
        self.store.append_turn(session_id, user_turn).await?;
        let recorded = self
            .store
            .append_turn(session_id, Turn::assistant(&reply, phase))
            .await?;

        if phase.is_closing() && !session.is_closed() {
            self.store.close_session(session_id).await?;
            info!(session = session_id, %phase, "Session closed");
        }

        self.conversation_logger.log(ConversationEvent::new(
            "turn_completed",
            serde_json::json!({
                "session": session_id,
                "turn": recorded.id.clone(),
                "phase": phase.as_str(),
                "user_bytes": input.user_text.len(),
                "reply_bytes": reply.len(),
            }),
        ));

        if reply.trim().is_empty() {
            warn!(session = session_id, "Provider returned an empty reply");
        }

        Ok(RunTurnOutput {
            reply,
            phase,
            turn_id: recorded.id,
        })
    }
}
