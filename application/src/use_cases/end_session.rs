//! End Session use case.
//!
//! Closes a session without producing a model turn — the explicit "I'm
//! done" path from the caller, as opposed to the wrap-up phase closing a
//! session after a reply.

use crate::ports::session_store::{SessionStore, StoreError};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while ending a session.
#[derive(Error, Debug)]
pub enum EndSessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for EndSessionError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => EndSessionError::NotFound(id),
            e => EndSessionError::Store(e),
        }
    }
}

/// Use case for explicitly closing a session.
pub struct EndSessionUseCase {
    store: Arc<dyn SessionStore>,
}

impl EndSessionUseCase {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Idempotent: closing an already-closed session succeeds.
    pub async fn execute(&self, session_id: &str) -> Result<(), EndSessionError> {
        self.store.close_session(session_id).await?;
        info!(session = session_id, "Session closed by caller");
        Ok(())
    }
}
