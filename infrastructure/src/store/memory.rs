//! In-memory session store.
//!
//! Ephemeral adapter for `--ephemeral` runs and tests; nothing survives the
//! process. Uses the domain entity's own append rules, so the ordering
//! invariant holds here exactly as it does on disk.

use async_trait::async_trait;
use clarity_application::{SessionStore, SessionSummary, StoreError};
use clarity_domain::{Session, Turn};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Session store holding everything in a process-local map.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create_session(&self, owner_id: &str) -> Result<Session, StoreError> {
        let owner_id = owner_id.trim();
        if owner_id.is_empty() {
            return Err(StoreError::Unauthorized("<blank>".to_string()));
        }

        let session = Session::new(owner_id);
        self.sessions
            .write()
            .await
            .insert(session.id().to_string(), session.clone());
        Ok(session)
    }

    async fn get_session(&self, session_id: &str) -> Result<Session, StoreError> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(session_id.to_string()))
    }

    async fn list_turns(&self, session_id: &str) -> Result<Vec<Turn>, StoreError> {
        Ok(self.get_session(session_id).await?.turns().to_vec())
    }

    async fn append_turn(&self, session_id: &str, turn: Turn) -> Result<Turn, StoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| StoreError::NotFound(session_id.to_string()))?;
        session
            .append_turn(turn)
            .map(|t| t.clone())
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn close_session(&self, session_id: &str) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| StoreError::NotFound(session_id.to_string()))?;
        session.close();
        Ok(())
    }

    async fn list_sessions(&self, owner_id: &str) -> Result<Vec<SessionSummary>, StoreError> {
        Ok(self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| s.owner_id() == owner_id)
            .map(|s| SessionSummary {
                id: s.id().to_string(),
                owner_id: s.owner_id().to_string(),
                created_at: s.created_at(),
                turn_count: s.turns().len(),
                closed: s.is_closed(),
            })
            .collect())
    }
}
