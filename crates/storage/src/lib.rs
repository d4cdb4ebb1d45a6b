pub mod csv_store;
pub mod store;

pub use csv_store::CsvStore;
pub use store::{MemoryStore, StorageError, TransactionStore};
