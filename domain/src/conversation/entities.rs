//! Conversation domain entities

use crate::conversation::phase::Phase;
use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A provider-bound message (role + content), the unit of prompt assembly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// One persisted conversation turn (Entity)
///
/// The id is generated at construction time, before any persistence
/// attempt, so a store retry records the same turn rather than a duplicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Policy mode that produced an assistant turn; `None` on user turns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
            created_at: Utc::now(),
            phase: None,
        }
    }

    pub fn assistant(content: impl Into<String>, phase: Phase) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
            created_at: Utc::now(),
            phase: Some(phase),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

/// One reflection conversation (Entity)
///
/// Owned by a user, created on first contact, mutated only by appending
/// turns and closing. Sessions are never structurally deleted; closed
/// sessions remain listable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    id: String,
    owner_id: String,
    created_at: DateTime<Utc>,
    closed: bool,
    turns: Vec<Turn>,
}

impl Session {
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            created_at: Utc::now(),
            closed: false,
            turns: Vec::new(),
        }
    }

    /// Rehydrate a session from persisted parts. For storage adapters;
    /// the turn sequence is trusted as recorded.
    pub fn from_parts(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        created_at: DateTime<Utc>,
        closed: bool,
        turns: Vec<Turn>,
    ) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            created_at,
            closed,
            turns,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Count of assistant turns; the input to phase resolution.
    pub fn assistant_turn_count(&self) -> usize {
        self.turns.iter().filter(|t| t.is_assistant()).count()
    }

    /// Append a turn, enforcing the ordering invariant: an assistant turn
    /// must directly follow a user turn. Consecutive user turns are legal
    /// (an unanswered message stays in history as context).
    pub fn append_turn(&mut self, turn: Turn) -> Result<&Turn, DomainError> {
        if turn.is_assistant() && !self.turns.last().is_some_and(|t| t.is_user()) {
            return Err(DomainError::AssistantTurnOrder);
        }
        self.turns.push(turn);
        Ok(self.turns.last().expect("turn just pushed"))
    }

    /// Mark the session closed. Idempotent; turns may still be appended
    /// afterwards (post-closure replies stay in wrap-up mode by policy).
    pub fn close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_alternating_turns() {
        let mut session = Session::new("user-1");
        session.append_turn(Turn::user("hello")).unwrap();
        session
            .append_turn(Turn::assistant("hi, what's on your mind?", Phase::Opening))
            .unwrap();
        assert_eq!(session.turns().len(), 2);
        assert_eq!(session.assistant_turn_count(), 1);
    }

    #[test]
    fn test_assistant_first_is_rejected() {
        let mut session = Session::new("user-1");
        let err = session
            .append_turn(Turn::assistant("hello", Phase::Opening))
            .unwrap_err();
        assert!(matches!(err, DomainError::AssistantTurnOrder));
        assert!(session.turns().is_empty());
    }

    #[test]
    fn test_consecutive_assistant_turns_rejected() {
        let mut session = Session::new("user-1");
        session.append_turn(Turn::user("hello")).unwrap();
        session
            .append_turn(Turn::assistant("hi", Phase::Opening))
            .unwrap();
        let err = session
            .append_turn(Turn::assistant("still there?", Phase::Reflecting))
            .unwrap_err();
        assert!(matches!(err, DomainError::AssistantTurnOrder));
        assert_eq!(session.assistant_turn_count(), 1);
    }

    #[test]
    fn test_consecutive_user_turns_allowed() {
        // An unanswered user turn followed by a fresh user message is the
        // reconciliation path after a mid-flight failure.
        let mut session = Session::new("user-1");
        session.append_turn(Turn::user("first")).unwrap();
        session.append_turn(Turn::user("second")).unwrap();
        assert_eq!(session.turns().len(), 2);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut session = Session::new("user-1");
        assert!(!session.is_closed());
        session.close();
        session.close();
        assert!(session.is_closed());
    }

    #[test]
    fn test_append_after_close_allowed() {
        let mut session = Session::new("user-1");
        session.close();
        session.append_turn(Turn::user("one more thing")).unwrap();
        session
            .append_turn(Turn::assistant("of course", Phase::WrapUp))
            .unwrap();
        assert_eq!(session.turns().len(), 2);
    }

    #[test]
    fn test_turn_serde_roundtrip_keeps_phase_tag() {
        let turn = Turn::assistant("take a breath", Phase::WrapUp);
        let json = serde_json::to_string(&turn).unwrap();
        let back: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, Some(Phase::WrapUp));
        assert_eq!(back.id, turn.id);

        let user = Turn::user("hi");
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("phase"));
    }
}
