use weali_core::{Source, Transaction};

use crate::error::{ImportError, RowError};
use crate::provider::{ProviderProfile, RowOutcome};
use crate::row::RawRow;

/// A row that could not be imported, with its 1-based line in the upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRejection {
    pub line: u64,
    pub error: RowError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Accepted records in upload order.
    pub transactions: Vec<Transaction>,
    pub rejected: Vec<RowRejection>,
    /// Rows dropped because the provider marked them failed or cancelled.
    pub filtered: usize,
}

impl ImportReport {
    pub fn accepted(&self) -> usize {
        self.transactions.len()
    }
}

/// Resolves a provider selector such as `"wechat"` or `"Alipay"`.
pub fn resolve_source(selector: &str) -> Result<Source, ImportError> {
    selector
        .parse::<Source>()
        .map_err(|_| ImportError::UnsupportedSource(selector.to_string()))
}

/// Imports an uploaded CSV export for the provider named by `selector`.
///
/// Only an unknown provider or an unreadable header fails the batch; bad rows
/// are logged, recorded in the report and skipped.
pub fn import_csv(text: &str, selector: &str) -> Result<ImportReport, ImportError> {
    let source = resolve_source(selector)?;
    import_with_profile(text, ProviderProfile::for_source(source))
}

pub fn import_with_profile(
    text: &str,
    profile: &ProviderProfile,
) -> Result<ImportReport, ImportError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let mut report = ImportReport::default();

    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 2);

        match profile.parse_row(&RawRow::from_record(&headers, &record)) {
            Ok(RowOutcome::Accepted(tx)) => report.transactions.push(tx),
            Ok(RowOutcome::Filtered { status }) => {
                tracing::debug!(source = %profile.source, line, %status, "Skipping unsuccessful payment");
                report.filtered += 1;
            }
            Err(error) => {
                tracing::warn!(source = %profile.source, line, %error, "Skipping row");
                report.rejected.push(RowRejection { line, error });
            }
        }
    }

    tracing::info!(
        source = %profile.source,
        accepted = report.accepted(),
        rejected = report.rejected.len(),
        filtered = report.filtered,
        "Parsed upload"
    );

    Ok(report)
}
