use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use super::money::Money;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unsupported source type: {0}")]
    UnsupportedSource(String),
    #[error("Unknown transaction type: {0}")]
    UnknownTransactionType(String),
    #[error("Amount must not be negative: {0}")]
    NegativeAmount(Money),
}

/// Opaque record identifier. Freshly parsed records get a UUID v4; records read
/// back from storage keep whatever text was persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn generate() -> Self {
        TransactionId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TransactionId {
    fn from(id: String) -> Self {
        TransactionId(id)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(CoreError::UnknownTransactionType(s.to_string())),
        }
    }
}

/// The payment provider a record was imported from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Wechat,
    Alipay,
}

impl Source {
    pub const ALL: [Source; 2] = [Source::Wechat, Source::Alipay];

    pub fn as_str(self) -> &'static str {
        match self {
            Source::Wechat => "wechat",
            Source::Alipay => "alipay",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wechat" => Ok(Source::Wechat),
            "alipay" => Ok(Source::Alipay),
            _ => Err(CoreError::UnsupportedSource(s.to_string())),
        }
    }
}

/// A normalized payment record.
///
/// `amount` is always a magnitude; the direction of the money lives in
/// `transaction_type`. Records are never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    #[serde(rename = "transaction_id")]
    id: TransactionId,
    timestamp: NaiveDateTime,
    description: String,
    amount: Money,
    currency: String,
    transaction_type: TransactionType,
    source: Source,
}

impl Transaction {
    /// Builds a new record with a fresh id. A signed amount is stored as its
    /// absolute value.
    pub fn new(
        timestamp: NaiveDateTime,
        description: impl Into<String>,
        amount: Money,
        currency: impl Into<String>,
        transaction_type: TransactionType,
        source: Source,
    ) -> Self {
        Transaction {
            id: TransactionId::generate(),
            timestamp,
            description: description.into(),
            amount: amount.abs(),
            currency: currency.into(),
            transaction_type,
            source,
        }
    }

    /// Rebuilds a previously persisted record. Rejects negative amounts rather
    /// than silently flipping them.
    pub fn restore(
        id: TransactionId,
        timestamp: NaiveDateTime,
        description: String,
        amount: Money,
        currency: String,
        transaction_type: TransactionType,
        source: Source,
    ) -> Result<Self, CoreError> {
        if amount.is_negative() {
            return Err(CoreError::NegativeAmount(amount));
        }
        Ok(Transaction {
            id,
            timestamp,
            description,
            amount,
            currency,
            transaction_type,
            source,
        })
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}
