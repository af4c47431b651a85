//! JSONL file writer for session audit records.
//!
//! Each [`AuditRecord`] is serialized as a single JSON line
//! (`{timestamp, session_id, type, data}`), appended via a buffered writer.

use chrono::Local;
use hostscope_application::{AuditRecord, AuditSink};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Audit sink that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record and
/// on `Drop`.
pub struct JsonlAuditSink {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlAuditSink {
    /// Open `<dir>/<YYYYMMDD_HHMMSS>_<session_id>.jsonl`.
    ///
    /// Creates the directory if needed. Returns `None` (with a warning) if
    /// the file cannot be created; the session then runs unaudited.
    pub fn for_session(dir: impl AsRef<Path>, session_id: &str) -> Option<Self> {
        let name = format!(
            "{}_{}.jsonl",
            Local::now().format("%Y%m%d_%H%M%S"),
            session_id
        );
        Self::new(dir.as_ref().join(name))
    }

    /// Create a sink writing to the given path.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create audit directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create audit file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the audit file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for JsonlAuditSink {
    fn record(&self, record: AuditRecord) {
        let Ok(line) = serde_json::to_string(&record.to_json()) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            // Flushed per line: a crash must not lose the transcript tail.
            if writeln!(writer, "{}", line).and_then(|_| writer.flush()).is_err() {
                warn!(path = %self.path.display(), "Failed to write audit record");
            }
        }
    }
}

impl Drop for JsonlAuditSink {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostscope_application::{AuditEventKind, ChatSession};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_jsonl_sink_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.jsonl");
        let sink = JsonlAuditSink::new(&path).unwrap();

        sink.record(AuditRecord::new(
            "s1",
            AuditEventKind::UserMessage,
            json!({"content": "why 500?"}),
        ));
        sink.record(AuditRecord::new(
            "s1",
            AuditEventKind::ToolUse,
            json!({"tool_name": "grep", "tool_id": "t1", "input": {"pattern": "500"}}),
        ));
        drop(sink);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line["timestamp"].as_str().unwrap().ends_with('Z'));
            assert_eq!(line["session_id"], "s1");
        }
        assert_eq!(lines[0]["type"], "user_message");
        assert_eq!(lines[0]["data"]["content"], "why 500?");
        assert_eq!(lines[1]["type"], "tool_use");
        assert_eq!(lines[1]["data"]["input"]["pattern"], "500");
    }

    #[test]
    fn test_for_session_names_file_after_session() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonlAuditSink::for_session(dir.path().join("sessions"), "abc123").unwrap();

        let name = sink.path().file_name().unwrap().to_str().unwrap().to_string();
        assert!(name.ends_with("_abc123.jsonl"));
        // YYYYMMDD_HHMMSS_
        assert_eq!(name.len(), "20260101_000000_abc123.jsonl".len());
        assert!(sink.path().parent().unwrap().ends_with("sessions"));
    }

    #[test]
    fn test_session_lifecycle_is_audited_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = Arc::new(JsonlAuditSink::new(dir.path().join("s.jsonl")).unwrap());
        let path = sink.path().to_path_buf();

        let session = ChatSession::start("s9", sink.clone(), json!({"user": "dev"}));
        session.add_user_message("hello");
        drop(session);

        let kinds: Vec<String> = read_lines(&path)
            .iter()
            .map(|l| l["type"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(kinds, vec!["session_start", "user_message", "session_end"]);
    }

    #[test]
    fn test_unwritable_location_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        assert!(JsonlAuditSink::new(blocker.join("nested/audit.jsonl")).is_none());
    }
}
