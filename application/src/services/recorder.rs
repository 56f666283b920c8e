//! Operation recorder
//!
//! In-memory, append-only log of council dispatches. A single mutex guards
//! the insertion point; sequence numbers and outcome counts are updated
//! under it.

use council_domain::{OperationOutcome, OperationRecord, OperationStats, OperationStatus, RequestKind};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Log {
    records: Vec<Arc<OperationRecord>>,
    stats: OperationStats,
}

impl Log {
    fn tail(&self, n: usize) -> Vec<Arc<OperationRecord>> {
        let start = self.records.len().saturating_sub(n);
        self.records[start..].to_vec()
    }

    fn failed_tail(&self, n: usize) -> Vec<Arc<OperationRecord>> {
        let mut failed: Vec<_> = self
            .records
            .iter()
            .rev()
            .filter(|r| r.status() == OperationStatus::Failed)
            .take(n)
            .cloned()
            .collect();
        failed.reverse();
        failed
    }
}

/// Counts and tails read under one lock
#[derive(Debug, Clone)]
pub struct RecorderView {
    pub stats: OperationStats,
    /// Last records, oldest first
    pub recent: Vec<Arc<OperationRecord>>,
    /// Last failed records, oldest first
    pub recent_failures: Vec<Arc<OperationRecord>>,
}

#[derive(Default)]
pub struct OperationRecorder {
    log: Mutex<Log>,
}

impl OperationRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Log> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a record and return it
    pub fn record(
        &self,
        kind: RequestKind,
        input: impl Into<String>,
        outcome: OperationOutcome,
    ) -> Arc<OperationRecord> {
        let mut log = self.lock();
        let sequence = log.records.len() as u64 + 1;
        let record = Arc::new(OperationRecord::new(sequence, kind, input, outcome));
        log.stats.count(record.status());
        log.records.push(Arc::clone(&record));
        record
    }

    /// The last `n` records, oldest first
    pub fn recent(&self, n: usize) -> Vec<Arc<OperationRecord>> {
        self.lock().tail(n)
    }

    /// Stats plus both tails, consistent with each other
    pub fn view(&self, recent: usize, failures: usize) -> RecorderView {
        let log = self.lock();
        RecorderView {
            stats: log.stats,
            recent: log.tail(recent),
            recent_failures: log.failed_tail(failures),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
