//! Normalization of WeChat Pay and Alipay CSV exports into [`weali_core::Transaction`] records.

pub mod amount;
pub mod batch;
pub mod error;
pub mod provider;
pub mod row;
pub mod timestamp;

pub use amount::normalize_amount;
pub use batch::{import_csv, import_with_profile, resolve_source, ImportReport, RowRejection};
pub use error::{ImportError, RowError};
pub use provider::{ProviderProfile, RowOutcome, ALIPAY, WECHAT};
pub use row::{lookup, RawRow};
pub use timestamp::normalize_timestamp;
