use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use weali_core::{Money, Source, Transaction, TransactionId, TransactionType};

use crate::store::{StorageError, TransactionStore};

pub const FILE_NAME: &str = "transactions.csv";

pub const HEADER: [&str; 7] = [
    "transaction_id",
    "timestamp",
    "description",
    "amount",
    "currency",
    "transaction_type",
    "source",
];

/// Sortable ISO-8601 text; the fraction is only written when non-zero.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// One persisted line, every column kept as text.
#[derive(Debug, Serialize, Deserialize)]
struct StoredRow {
    transaction_id: String,
    timestamp: String,
    description: String,
    amount: String,
    currency: String,
    transaction_type: String,
    source: String,
}

impl From<&Transaction> for StoredRow {
    fn from(tx: &Transaction) -> Self {
        StoredRow {
            transaction_id: tx.id().to_string(),
            timestamp: tx.timestamp().format(TIMESTAMP_FORMAT).to_string(),
            description: tx.description().to_string(),
            amount: tx.amount().as_decimal().to_string(),
            currency: tx.currency().to_string(),
            transaction_type: tx.transaction_type().to_string(),
            source: tx.source().to_string(),
        }
    }
}

impl StoredRow {
    fn into_transaction(self) -> Result<Transaction, String> {
        let timestamp = NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT)
            .map_err(|e| format!("timestamp {:?}: {e}", self.timestamp))?;
        let amount = self
            .amount
            .parse::<Money>()
            .map_err(|e| format!("amount {:?}: {e}", self.amount))?;
        let transaction_type = self
            .transaction_type
            .parse::<TransactionType>()
            .map_err(|e| e.to_string())?;
        let source = self.source.parse::<Source>().map_err(|e| e.to_string())?;

        Transaction::restore(
            TransactionId::from(self.transaction_id),
            timestamp,
            self.description,
            amount,
            self.currency,
            transaction_type,
            source,
        )
        .map_err(|e| e.to_string())
    }
}

/// Flat-file store: one CSV file with a fixed seven-column header.
#[derive(Debug)]
pub struct CsvStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvStore {
    /// Opens (creating if needed) `<data_dir>/transactions.csv`.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)?;
        let store = CsvStore {
            path: data_dir.join(FILE_NAME),
            lock: Mutex::new(()),
        };
        store.ensure_header()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the header into a missing or zero-length file.
    fn ensure_header(&self) -> Result<(), StorageError> {
        match fs::metadata(&self.path) {
            Ok(meta) if meta.len() > 0 => return Ok(()),
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        let mut writer = csv::Writer::from_writer(File::create(&self.path)?);
        writer.write_record(HEADER)?;
        writer.flush()?;
        Ok(())
    }
}

impl TransactionStore for CsvStore {
    fn append(&self, records: &[Transaction]) -> Result<(), StorageError> {
        if records.is_empty() {
            return Ok(());
        }
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.ensure_header()?;

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        for tx in records {
            writer.serialize(StoredRow::from(tx))?;
        }
        writer.flush()?;

        tracing::debug!(count = records.len(), path = %self.path.display(), "Appended transactions");
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Transaction>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;

        let mut transactions = Vec::new();
        for (idx, result) in reader.deserialize::<StoredRow>().enumerate() {
            let row = idx as u64 + 1;
            let parsed = result
                .map_err(|e| e.to_string())
                .and_then(StoredRow::into_transaction);
            match parsed {
                Ok(tx) => transactions.push(tx),
                Err(reason) => {
                    let error = StorageError::Corrupted { row, reason };
                    tracing::warn!(path = %self.path.display(), %error, "Skipping stored row");
                }
            }
        }
        Ok(transactions)
    }
}
