use serde::Serialize;

use super::money::Money;
use super::transaction::{Source, Transaction, TransactionType};

/// Aggregate view over a set of stored transactions. Always recomputed from the
/// full record set; nothing here is cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionSummary {
    pub total_count: usize,
    pub wechat_count: usize,
    pub alipay_count: usize,
    pub total_income: Money,
    pub total_expense: Money,
    pub net_amount: Money,
}

impl TransactionSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let count_source = |source: Source| {
            transactions
                .iter()
                .filter(|t| t.source() == source)
                .count()
        };
        let total_of = |kind: TransactionType| -> Money {
            transactions
                .iter()
                .filter(|t| t.transaction_type() == kind)
                .map(|t| t.amount())
                .sum()
        };

        let total_income = total_of(TransactionType::Income);
        let total_expense = total_of(TransactionType::Expense);

        TransactionSummary {
            total_count: transactions.len(),
            wechat_count: count_source(Source::Wechat),
            alipay_count: count_source(Source::Alipay),
            total_income,
            total_expense,
            net_amount: total_income - total_expense,
        }
    }
}
