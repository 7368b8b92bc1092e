//! JSONL file writer for conversation events.
//!
//! Each [`ConversationEvent`] becomes one JSON line with `type` and
//! `timestamp` fields merged into the payload. The file is opened in append
//! mode so transcripts accumulate across process runs.

use clarity_application::{ConversationEvent, ConversationLogger};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL transcript logger writing one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`; flushes after every event and
/// on `Drop`, since transcript lines are few and losing them to a crash is
/// worse than the extra syscalls.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open (or create) the transcript file at `path`, creating parent
    /// directories as needed. Returns `None` if the file cannot be opened;
    /// logging is optional and never blocks startup.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(
                    "Could not create transcript directory {}: {}",
                    parent.display(),
                    e
                );
                return None;
            }
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open transcript file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Path of the transcript file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        // Flatten object payloads into the record; wrap anything else
        // under "data" so the line is always one flat object.
        let mut record = serde_json::Map::new();
        record.insert("type".into(), event.event_type.into());
        record.insert("timestamp".into(), timestamp.into());
        match event.payload {
            serde_json::Value::Object(fields) => record.extend(fields),
            other => {
                record.insert("data".into(), other);
            }
        }

        let Ok(line) = serde_json::to_string(&serde_json::Value::Object(record)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
