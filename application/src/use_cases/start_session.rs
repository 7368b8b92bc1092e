//! Start Session use case.

use crate::ports::session_store::{SessionStore, StoreError};
use clarity_domain::Session;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while starting a session.
#[derive(Error, Debug)]
pub enum StartSessionError {
    #[error("Unauthorized owner: {0}")]
    Unauthorized(String),

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for StartSessionError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unauthorized(owner) => StartSessionError::Unauthorized(owner),
            e => StartSessionError::Store(e),
        }
    }
}

/// Use case for creating a new reflection session.
pub struct StartSessionUseCase {
    store: Arc<dyn SessionStore>,
}

impl StartSessionUseCase {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, owner_id: &str) -> Result<Session, StartSessionError> {
        let owner_id = owner_id.trim();
        if owner_id.is_empty() {
            return Err(StartSessionError::Unauthorized("<blank>".to_string()));
        }

        let session = self.store.create_session(owner_id).await?;
        info!(session = session.id(), owner = owner_id, "Session started");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::session_store::SessionSummary;
    use async_trait::async_trait;
    use clarity_domain::Turn;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MemStore {
        sessions: Mutex<HashMap<String, Session>>,
    }

    impl MemStore {
        fn new() -> Self {
            Self {
                sessions: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl SessionStore for MemStore {
        async fn create_session(&self, owner_id: &str) -> Result<Session, StoreError> {
            let session = Session::new(owner_id);
            self.sessions
                .lock()
                .unwrap()
                .insert(session.id().to_string(), session.clone());
            Ok(session)
        }

        async fn get_session(&self, session_id: &str) -> Result<Session, StoreError> {
            self.sessions
                .lock()
                .unwrap()
                .get(session_id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(session_id.to_string()))
        }

        async fn list_turns(&self, session_id: &str) -> Result<Vec<Turn>, StoreError> {
            Ok(self.get_session(session_id).await?.turns().to_vec())
        }

        async fn append_turn(&self, _session_id: &str, turn: Turn) -> Result<Turn, StoreError> {
            Ok(turn)
        }

        async fn close_session(&self, _session_id: &str) -> Result<(), StoreError> {
            Ok(())
        }

        async fn list_sessions(&self, _owner_id: &str) -> Result<Vec<SessionSummary>, StoreError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_creates_session_for_owner() {
        let uc = StartSessionUseCase::new(Arc::new(MemStore::new()));
        let session = uc.execute("user-1").await.unwrap();
        assert_eq!(session.owner_id(), "user-1");
        assert!(session.turns().is_empty());
        assert!(!session.is_closed());
    }

    #[tokio::test]
    async fn test_blank_owner_is_unauthorized() {
        let uc = StartSessionUseCase::new(Arc::new(MemStore::new()));
        let err = uc.execute("   ").await.unwrap_err();
        assert!(matches!(err, StartSessionError::Unauthorized(_)));
    }
}
