//! Per-session turn serialization.
//!
//! Within one session turn processing is serialized: at most one turn is in
//! flight per session id, so interleaved appends cannot corrupt a history.
//! Different sessions share no state and proceed independently.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Registry handing out one async mutex per session id.
pub struct SessionGate {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// The mutex for a session id; the same id always yields the same lock.
    pub async fn lock_for(&self, session_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new()
    }
}
