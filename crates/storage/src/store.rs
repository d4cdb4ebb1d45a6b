use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use weali_core::Transaction;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// A persisted row that no longer reads back as a record. Loads skip it.
    #[error("Corrupted stored row {row}: {reason}")]
    Corrupted { row: u64, reason: String },
}

/// Append-only home for imported transactions.
///
/// Implementations must serialize concurrent appends so rows from two uploads
/// never interleave.
pub trait TransactionStore: Send + Sync {
    /// Appends `records` in order. An empty slice is a no-op.
    fn append(&self, records: &[Transaction]) -> Result<(), StorageError>;

    /// Every readable record in append order. Unreadable rows are skipped.
    fn load_all(&self) -> Result<Vec<Transaction>, StorageError>;

    fn count(&self) -> Result<usize, StorageError> {
        Ok(self.load_all()?.len())
    }
}

// ── In-memory store (tests, ephemeral use) ────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Transaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionStore for MemoryStore {
    fn append(&self, records: &[Transaction]) -> Result<(), StorageError> {
        if records.is_empty() {
            return Ok(());
        }
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(records);
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Transaction>, StorageError> {
        Ok(self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}
