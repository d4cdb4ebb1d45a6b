pub mod money;
pub mod summary;
pub mod transaction;

pub use money::Money;
pub use summary::TransactionSummary;
pub use transaction::{CoreError, Source, Transaction, TransactionId, TransactionType};
