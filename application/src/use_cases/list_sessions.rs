//! List Sessions use case.

use crate::ports::session_store::{SessionStore, SessionSummary, StoreError};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while listing sessions.
#[derive(Error, Debug)]
pub enum ListSessionsError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Use case for listing an owner's sessions, newest first.
pub struct ListSessionsUseCase {
    store: Arc<dyn SessionStore>,
}

impl ListSessionsUseCase {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, owner_id: &str) -> Result<Vec<SessionSummary>, ListSessionsError> {
        let mut sessions = self.store.list_sessions(owner_id).await?;
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }
}
