//! JSONL file writer for dispatch outcomes.
//!
//! Each [`JournalEvent`] becomes one JSON line carrying the event payload
//! plus `type` and `timestamp` fields. Existing journals are appended to.

use council_application::{JournalEvent, OperationJournal};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Operation journal writing one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every line and on `Drop`.
pub struct JsonlOperationJournal {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlOperationJournal {
    /// Open (or create) the journal at `path`, creating parent directories.
    ///
    /// Returns `None` if the file cannot be opened; the caller runs without a journal.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create journal directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open journal file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn to_record(event: JournalEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut map = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::String(event.event_type.to_string()));
        map.insert("timestamp".to_string(), Value::String(timestamp));
        Value::Object(map)
    }
}

impl OperationJournal for JsonlOperationJournal {
    fn log(&self, event: JournalEvent) {
        let Ok(line) = serde_json::to_string(&Self::to_record(event)) else {
            return;
        };

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            warn!("Journal write to {} failed: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlOperationJournal {
    fn drop(&mut self) {
        let writer = self.writer.get_mut().unwrap_or_else(PoisonError::into_inner);
        let _ = writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_journal_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("council.jsonl");
        let journal = JsonlOperationJournal::open(&path).unwrap();

        journal.log(JournalEvent::new(
            "dispatch_completed",
            serde_json::json!({
                "sequence": 1,
                "best_provider": "claude",
                "agreement": "medium",
            }),
        ));
        journal.log(JournalEvent::new(
            "dispatch_failed",
            serde_json::json!({"sequence": 2, "error": "No providers responded"}),
        ));
        drop(journal);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.get("timestamp").is_some()));
        assert_eq!(lines[0]["type"], "dispatch_completed");
        assert_eq!(lines[0]["best_provider"], "claude");
        assert_eq!(lines[1]["type"], "dispatch_failed");
        assert_eq!(lines[1]["error"], "No providers responded");
    }

    #[test]
    fn test_journal_appends_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("council.jsonl");

        for i in 0..2 {
            let journal = JsonlOperationJournal::open(&path).unwrap();
            journal.log(JournalEvent::new(
                "dispatch_completed",
                serde_json::json!({"sequence": i}),
            ));
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["sequence"], 1);
    }

    #[test]
    fn test_journal_wraps_non_object_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("council.jsonl");
        let journal = JsonlOperationJournal::open(&path).unwrap();

        journal.log(JournalEvent::new("note", serde_json::json!("plain text")));
        drop(journal);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "note");
        assert_eq!(lines[0]["data"], "plain text");
    }

    #[test]
    fn test_journal_keeps_writing_after_poisoned_lock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("council.jsonl");
        let journal = std::sync::Arc::new(JsonlOperationJournal::open(&path).unwrap());

        let holder = std::sync::Arc::clone(&journal);
        let _ = std::thread::spawn(move || {
            let _guard = holder.writer.lock().unwrap();
            panic!("writer thread died");
        })
        .join();
        assert!(journal.writer.is_poisoned());

        journal.log(JournalEvent::new(
            "dispatch_completed",
            serde_json::json!({"sequence": 7}),
        ));
        drop(journal);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["sequence"], 7);
    }

    #[test]
    fn test_journal_open_fails_on_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonlOperationJournal::open(dir.path()).is_none());
    }
}
