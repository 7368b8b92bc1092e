//! JSONL-backed session persistence.
//!
//! Each session maps to a file `{base_dir}/{session_id}.jsonl`: the first
//! line is a header record, every following line one serialized turn.
//! Appending a turn is a single appended line; closing rewrites the header.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clarity_application::{SessionStore, SessionSummary, StoreError};
use clarity_domain::{Session, Turn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// First line of every session file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionHeader {
    id: String,
    owner_id: String,
    created_at: DateTime<Utc>,
    closed: bool,
}

impl SessionHeader {
    fn of(session: &Session) -> Self {
        Self {
            id: session.id().to_string(),
            owner_id: session.owner_id().to_string(),
            created_at: session.created_at(),
            closed: session.is_closed(),
        }
    }
}

/// Persistent session store backed by one JSONL file per session.
pub struct JsonlSessionStore {
    base_dir: PathBuf,
}

impl JsonlSessionStore {
    /// Create a new store. Creates `base_dir` if it doesn't exist.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir).map_err(|e| {
            StoreError::Backend(format!(
                "failed to create session directory {}: {e}",
                base_dir.display()
            ))
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn session_path(&self, session_id: &str) -> PathBuf {
        // Ids are uuids, but sanitize anyway so a crafted id cannot escape
        // the base directory.
        let sanitized: String = session_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_dir.join(format!("{sanitized}.jsonl"))
    }

    async fn read_session_file(
        &self,
        session_id: &str,
    ) -> Result<(SessionHeader, Vec<Turn>), StoreError> {
        let path = self.session_path(session_id);
        if !path.exists() {
            return Err(StoreError::NotFound(session_id.to_string()));
        }

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| StoreError::Backend(format!("failed to read {}: {e}", path.display())))?;

        let mut lines = content.lines().filter(|l| !l.trim().is_empty());
        let header_line = lines
            .next()
            .ok_or_else(|| StoreError::Corrupt(format!("{}: empty session file", path.display())))?;
        let header: SessionHeader = serde_json::from_str(header_line).map_err(|e| {
            StoreError::Corrupt(format!("{}: bad header: {e}", path.display()))
        })?;

        let mut turns = Vec::new();
        for (line_num, line) in lines.enumerate() {
            match serde_json::from_str::<Turn>(line) {
                Ok(turn) => turns.push(turn),
                Err(e) => {
                    warn!(
                        line = line_num + 2,
                        error = %e,
                        path = %path.display(),
                        "Skipping malformed turn record"
                    );
                }
            }
        }

        Ok((header, turns))
    }

    async fn write_session_file(
        &self,
        header: &SessionHeader,
        turns: &[Turn],
    ) -> Result<(), StoreError> {
        let path = self.session_path(&header.id);
        let mut content = serde_json::to_string(header)
            .map_err(|e| StoreError::Backend(format!("failed to serialize header: {e}")))?;
        content.push('\n');
        for turn in turns {
            let line = serde_json::to_string(turn)
                .map_err(|e| StoreError::Backend(format!("failed to serialize turn: {e}")))?;
            content.push_str(&line);
            content.push('\n');
        }
        tokio::fs::write(&path, content.as_bytes())
            .await
            .map_err(|e| StoreError::Backend(format!("failed to write {}: {e}", path.display())))
    }
}

#[async_trait]
impl SessionStore for JsonlSessionStore {
    async fn create_session(&self, owner_id: &str) -> Result<Session, StoreError> {
        let owner_id = owner_id.trim();
        if owner_id.is_empty() {
            return Err(StoreError::Unauthorized("<blank>".to_string()));
        }

        let session = Session::new(owner_id);
        self.write_session_file(&SessionHeader::of(&session), &[])
            .await?;
        Ok(session)
    }

    async fn get_session(&self, session_id: &str) -> Result<Session, StoreError> {
        let (header, turns) = self.read_session_file(session_id).await?;
        Ok(Session::from_parts(
            header.id,
            header.owner_id,
            header.created_at,
            header.closed,
            turns,
        ))
    }

    async fn list_turns(&self, session_id: &str) -> Result<Vec<Turn>, StoreError> {
        let (_, turns) = self.read_session_file(session_id).await?;
        Ok(turns)
    }

    async fn append_turn(&self, session_id: &str, turn: Turn) -> Result<Turn, StoreError> {
        let path = self.session_path(session_id);
        if !path.exists() {
            return Err(StoreError::NotFound(session_id.to_string()));
        }

        let mut line = serde_json::to_string(&turn)
            .map_err(|e| StoreError::Backend(format!("failed to serialize turn: {e}")))?;
        line.push('\n');

        tokio::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .await
            .map_err(|e| StoreError::Backend(format!("failed to open {}: {e}", path.display())))?
            .write_all(line.as_bytes())
            .await
            .map_err(|e| {
                StoreError::Backend(format!("failed to append to {}: {e}", path.display()))
            })?;

        Ok(turn)
    }

    async fn close_session(&self, session_id: &str) -> Result<(), StoreError> {
        let (mut header, turns) = self.read_session_file(session_id).await?;
        header.closed = true;
        self.write_session_file(&header, &turns).await
    }

    async fn list_sessions(&self, owner_id: &str) -> Result<Vec<SessionSummary>, StoreError> {
        let mut entries = tokio::fs::read_dir(&self.base_dir).await.map_err(|e| {
            StoreError::Backend(format!(
                "failed to read session directory {}: {e}",
                self.base_dir.display()
            ))
        })?;

        let mut sessions = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "jsonl") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match self.read_session_file(stem).await {
                Ok((header, turns)) if header.owner_id == owner_id => {
                    sessions.push(SessionSummary {
                        id: header.id,
                        owner_id: header.owner_id,
                        created_at: header.created_at,
                        turn_count: turns.len(),
                        closed: header.closed,
                    });
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable session file");
                }
            }
        }

        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clarity_domain::Phase;

    fn store() -> (tempfile::TempDir, JsonlSessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlSessionStore::new(dir.path()).unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_create_append_list_roundtrip() {
        let (_dir, store) = store();
        let session = store.create_session("user-1").await.unwrap();

        assert!(store.list_turns(session.id()).await.unwrap().is_empty());

        store
            .append_turn(session.id(), Turn::user("hello"))
            .await
            .unwrap();
        store
            .append_turn(
                session.id(),
                Turn::assistant("what's on your mind?", Phase::Opening),
            )
            .await
            .unwrap();

        let turns = store.list_turns(session.id()).await.unwrap();
        assert_eq!(turns.len(), 2);
        assert!(turns[0].is_user());
        assert_eq!(turns[1].phase, Some(Phase::Opening));
    }

    #[tokio::test]
    async fn test_close_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let id = {
            let store = JsonlSessionStore::new(dir.path()).unwrap();
            let session = store.create_session("user-1").await.unwrap();
            store.close_session(session.id()).await.unwrap();
            session.id().to_string()
        };

        // Fresh store instance over the same directory
        let store = JsonlSessionStore::new(dir.path()).unwrap();
        let session = store.get_session(&id).await.unwrap();
        assert!(session.is_closed());
    }

    #[tokio::test]
    async fn test_close_preserves_turns() {
        let (_dir, store) = store();
        let session = store.create_session("user-1").await.unwrap();
        store
            .append_turn(session.id(), Turn::user("hello"))
            .await
            .unwrap();
        store.close_session(session.id()).await.unwrap();

        let turns = store.list_turns(session.id()).await.unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].content, "hello");
    }

    #[tokio::test]
    async fn test_malformed_turn_line_is_skipped() {
        let (_dir, store) = store();
        let session = store.create_session("user-1").await.unwrap();
        store
            .append_turn(session.id(), Turn::user("ok"))
            .await
            .unwrap();

        // Corrupt the file with a garbage line
        let path = store.session_path(session.id());
        let mut content = std::fs::read_to_string(&path).unwrap();
        content.push_str("{not json}\n");
        std::fs::write(&path, content).unwrap();

        let turns = store.list_turns(session.id()).await.unwrap();
        assert_eq!(turns.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_session_is_not_found() {
        let (_dir, store) = store();
        let err = store.list_turns("nope").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        let err = store
            .append_turn("nope", Turn::user("hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_blank_owner_is_unauthorized() {
        let (_dir, store) = store();
        let err = store.create_session("  ").await.unwrap_err();
        assert!(matches!(err, StoreError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_list_sessions_filters_by_owner() {
        let (_dir, store) = store();
        let mine = store.create_session("user-1").await.unwrap();
        store.create_session("user-2").await.unwrap();

        let sessions = store.list_sessions("user-1").await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, mine.id());
        assert_eq!(sessions[0].turn_count, 0);
        assert!(!sessions[0].closed);
    }

    #[tokio::test]
    async fn test_session_path_is_sanitized() {
        let (_dir, store) = store();
        let path = store.session_path("../escape");
        assert!(path.starts_with(store.base_dir()));
        assert!(!path.to_string_lossy().contains(".."));
    }
}
