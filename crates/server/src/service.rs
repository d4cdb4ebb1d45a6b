use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use weali_core::{Source, Transaction, TransactionSummary};
use weali_import::{import_with_profile, resolve_source, ImportError, ProviderProfile};
use weali_storage::{StorageError, TransactionStore};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// What an upload did. `imported` is the only count the caller is promised;
/// skipped rows do not turn an upload into a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadOutcome {
    pub source: Source,
    pub imported: usize,
    pub rejected: usize,
    pub filtered: usize,
}

/// Upload and reporting operations over an injected store.
pub struct TransactionService {
    store: Arc<dyn TransactionStore>,
}

impl TransactionService {
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self { store }
    }

    /// Parses `csv_text` as a `selector` export and appends whatever was
    /// accepted. An unknown selector stores nothing.
    pub fn process_upload(
        &self,
        csv_text: &str,
        selector: &str,
    ) -> Result<UploadOutcome, ServiceError> {
        let source = resolve_source(selector)?;
        let report = import_with_profile(csv_text, ProviderProfile::for_source(source))?;
        self.store.append(&report.transactions)?;

        let outcome = UploadOutcome {
            source,
            imported: report.accepted(),
            rejected: report.rejected.len(),
            filtered: report.filtered,
        };
        tracing::info!(
            %source,
            imported = outcome.imported,
            rejected = outcome.rejected,
            filtered = outcome.filtered,
            "Upload stored"
        );
        Ok(outcome)
    }

    /// Everything stored, in append order.
    pub fn all_transactions(&self) -> Result<Vec<Transaction>, ServiceError> {
        Ok(self.store.load_all()?)
    }

    pub fn transactions_by_source(&self, source: Source) -> Result<Vec<Transaction>, ServiceError> {
        let mut transactions = self.all_transactions()?;
        transactions.retain(|t| t.source() == source);
        Ok(transactions)
    }

    /// Newest first by timestamp, at most `limit` records.
    pub fn recent_transactions(&self, limit: usize) -> Result<Vec<Transaction>, ServiceError> {
        let mut transactions = self.all_transactions()?;
        transactions.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        transactions.truncate(limit);
        Ok(transactions)
    }

    pub fn summary(&self) -> Result<TransactionSummary, ServiceError> {
        Ok(TransactionSummary::from_transactions(&self.all_transactions()?))
    }
}
