//! Session store port
//!
//! Persistence contract for sessions and turns. The use cases consume only
//! this interface; adapters (JSONL files, in-memory) live in the
//! infrastructure layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clarity_domain::{Session, Turn};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Unauthorized owner: {0}")]
    Unauthorized(String),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Corrupt session record: {0}")]
    Corrupt(String),
}

/// Summary of a stored session, without loading its turns
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub turn_count: usize,
    pub closed: bool,
}

/// Persistence capability for reflection sessions
///
/// `append_turn` is monotonic: it never conflicts, and the turn is durably
/// recorded before the call returns. Sessions are soft-retained; closing
/// never deletes anything.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a session for an owner. Fails with [`StoreError::Unauthorized`]
    /// for a blank owner id.
    async fn create_session(&self, owner_id: &str) -> Result<Session, StoreError>;

    /// Fetch a session with its full turn history.
    async fn get_session(&self, session_id: &str) -> Result<Session, StoreError>;

    /// Turns in creation order; empty for a fresh session, never an error
    /// for an existing one.
    async fn list_turns(&self, session_id: &str) -> Result<Vec<Turn>, StoreError>;

    /// Durably append one turn and return the recorded turn.
    async fn append_turn(&self, session_id: &str, turn: Turn) -> Result<Turn, StoreError>;

    /// Mark a session closed. Idempotent.
    async fn close_session(&self, session_id: &str) -> Result<(), StoreError>;

    /// All sessions belonging to an owner.
    async fn list_sessions(&self, owner_id: &str) -> Result<Vec<SessionSummary>, StoreError>;
}
