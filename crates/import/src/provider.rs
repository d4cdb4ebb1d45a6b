use weali_core::{Money, Source, Transaction, TransactionType};

use crate::amount::normalize_amount;
use crate::error::RowError;
use crate::row::RawRow;
use crate::timestamp::normalize_timestamp;

const TYPE_ALIASES: &[&str] = &["收/支", "Type", "Transaction Type", "type"];

/// Column aliases and fixed values describing one provider's export format.
///
/// Alias lists are ordered: earlier names win when a row carries several.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderProfile {
    pub source: Source,
    pub currency: &'static str,
    /// Description used when the row has none.
    pub placeholder: &'static str,
    pub timestamp_aliases: &'static [&'static str],
    pub description_aliases: &'static [&'static str],
    pub amount_aliases: &'static [&'static str],
    pub type_aliases: &'static [&'static str],
    pub status_aliases: &'static [&'static str],
    /// Lowercase fragments of a status that mark the payment as not completed.
    /// Empty means the provider's rows are never filtered on status.
    pub failure_keywords: &'static [&'static str],
}

pub const WECHAT: ProviderProfile = ProviderProfile {
    source: Source::Wechat,
    currency: "CNY",
    placeholder: "WeChat Transaction",
    timestamp_aliases: &["时间", "Time", "Date", "Timestamp", "timestamp"],
    description_aliases: &["商品", "Description", "Merchant", "Item", "description"],
    amount_aliases: &["金额(元)", "Amount", "Money", "amount"],
    type_aliases: TYPE_ALIASES,
    status_aliases: &[],
    failure_keywords: &[],
};

pub const ALIPAY: ProviderProfile = ProviderProfile {
    source: Source::Alipay,
    currency: "CNY",
    placeholder: "Alipay Transaction",
    timestamp_aliases: &["交易时间", "Transaction Time", "Date", "Timestamp", "timestamp"],
    description_aliases: &["交易对方", "Counterparty", "Description", "Merchant", "description"],
    amount_aliases: &["金额", "Amount", "Money", "amount"],
    type_aliases: TYPE_ALIASES,
    status_aliases: &["交易状态", "Status", "status"],
    failure_keywords: &["失败", "failed", "cancelled"],
};

impl ProviderProfile {
    pub fn for_source(source: Source) -> &'static ProviderProfile {
        match source {
            Source::Wechat => &WECHAT,
            Source::Alipay => &ALIPAY,
        }
    }

    /// Normalizes one export row.
    ///
    /// A missing or unparseable timestamp or amount fails the row. A row whose
    /// status marks the payment failed or cancelled yields
    /// [`RowOutcome::Filtered`] instead of a record.
    pub fn parse_row(&self, row: &RawRow) -> Result<RowOutcome, RowError> {
        let timestamp_text = row
            .lookup(self.timestamp_aliases)
            .ok_or(RowError::MissingField("timestamp"))?;
        let timestamp = normalize_timestamp(timestamp_text)?;

        let description = row
            .lookup(self.description_aliases)
            .unwrap_or(self.placeholder);

        let amount_text = row
            .lookup(self.amount_aliases)
            .ok_or(RowError::MissingField("amount"))?;
        let amount = Money::from_decimal(normalize_amount(amount_text)?);

        let transaction_type = match row.lookup(self.type_aliases) {
            Some(text) => classify_type(text),
            None if amount.is_negative() => TransactionType::Expense,
            None => TransactionType::Income,
        };

        if let Some(status) = self.failed_status(row) {
            return Ok(RowOutcome::Filtered {
                status: status.to_string(),
            });
        }

        Ok(RowOutcome::Accepted(Transaction::new(
            timestamp,
            description,
            amount,
            self.currency,
            transaction_type,
            self.source,
        )))
    }

    fn failed_status<'a>(&self, row: &'a RawRow) -> Option<&'a str> {
        if self.failure_keywords.is_empty() {
            return None;
        }
        let status = row.lookup(self.status_aliases)?;
        let lowered = status.to_lowercase();
        self.failure_keywords
            .iter()
            .any(|keyword| lowered.contains(keyword))
            .then_some(status)
    }
}

/// Result of a row that parsed cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Accepted(Transaction),
    /// The provider reported the payment as failed or cancelled.
    Filtered { status: String },
}

impl RowOutcome {
    pub fn into_transaction(self) -> Option<Transaction> {
        match self {
            RowOutcome::Accepted(tx) => Some(tx),
            RowOutcome::Filtered { .. } => None,
        }
    }
}

/// Income if the text names income, otherwise expense.
fn classify_type(text: &str) -> TransactionType {
    let lowered = text.to_lowercase();
    if lowered.contains("收入") || lowered.contains("income") {
        TransactionType::Income
    } else {
        TransactionType::Expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs.iter().copied().collect()
    }

    fn accepted(profile: &ProviderProfile, r: &RawRow) -> Transaction {
        match profile.parse_row(r).unwrap() {
            RowOutcome::Accepted(tx) => tx,
            other => panic!("expected a record, got {other:?}"),
        }
    }

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    // ── WeChat ────────────────────────────────────────────────────────────────

    #[test]
    fn wechat_full_row() {
        let r = row(&[
            ("时间", "2024-01-15 10:30:00"),
            ("商品", "Coffee"),
            ("金额(元)", "¥25.00"),
            ("收/支", "支出"),
        ]);
        let tx = accepted(&WECHAT, &r);
        assert_eq!(
            tx.timestamp(),
            NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap()
        );
        assert_eq!(tx.description(), "Coffee");
        assert_eq!(tx.amount(), money("25.00"));
        assert_eq!(tx.currency(), "CNY");
        assert_eq!(tx.transaction_type(), TransactionType::Expense);
        assert_eq!(tx.source(), Source::Wechat);
    }

    #[test]
    fn negative_amount_without_type_column_is_expense() {
        let r = row(&[("Date", "2024-01-15"), ("Amount", "-42.00")]);
        let tx = accepted(&WECHAT, &r);
        assert_eq!(tx.transaction_type(), TransactionType::Expense);
        assert_eq!(tx.amount(), money("42.00"));
    }

    #[test]
    fn positive_amount_without_type_column_is_income() {
        let r = row(&[("Date", "2024-01-15"), ("Amount", "42.00")]);
        let tx = accepted(&WECHAT, &r);
        assert_eq!(tx.transaction_type(), TransactionType::Income);
        assert_eq!(tx.amount(), money("42.00"));
    }

    #[test]
    fn zero_amount_without_type_column_is_income() {
        let r = row(&[("Date", "2024-01-15"), ("Amount", "0.00")]);
        assert_eq!(accepted(&WECHAT, &r).transaction_type(), TransactionType::Income);
    }

    #[test]
    fn parenthesized_amount_is_expense_magnitude() {
        let r = row(&[("Date", "2024-01-15"), ("Amount", "(99.00)")]);
        let tx = accepted(&WECHAT, &r);
        assert_eq!(tx.transaction_type(), TransactionType::Expense);
        assert_eq!(tx.amount(), money("99.00"));
    }

    #[test]
    fn type_column_overrides_sign() {
        let r = row(&[("Date", "2024-01-15"), ("Amount", "-10"), ("Type", "Income")]);
        let tx = accepted(&WECHAT, &r);
        assert_eq!(tx.transaction_type(), TransactionType::Income);
        assert_eq!(tx.amount(), money("10"));
    }

    #[test]
    fn unknown_type_text_defaults_to_expense() {
        let r = row(&[("Date", "2024-01-15"), ("Amount", "10"), ("收/支", "/")]);
        assert_eq!(accepted(&WECHAT, &r).transaction_type(), TransactionType::Expense);
    }

    #[test]
    fn chinese_income_keyword() {
        let r = row(&[("Date", "2024-01-15"), ("Amount", "10"), ("收/支", "收入")]);
        assert_eq!(accepted(&WECHAT, &r).transaction_type(), TransactionType::Income);
    }

    #[test]
    fn empty_type_column_falls_back_to_sign() {
        let r = row(&[("Date", "2024-01-15"), ("Amount", "-3"), ("Type", "")]);
        assert_eq!(accepted(&WECHAT, &r).transaction_type(), TransactionType::Expense);
        let r = row(&[("Date", "2024-01-15"), ("Amount", "3"), ("Type", "")]);
        assert_eq!(accepted(&WECHAT, &r).transaction_type(), TransactionType::Income);
    }

    #[test]
    fn missing_description_uses_placeholder() {
        let r = row(&[("Date", "2024-01-15"), ("Amount", "1"), ("商品", "")]);
        assert_eq!(accepted(&WECHAT, &r).description(), "WeChat Transaction");
        assert_eq!(accepted(&ALIPAY, &r).description(), "Alipay Transaction");
    }

    #[test]
    fn missing_timestamp_fails_row() {
        let r = row(&[("Amount", "1")]);
        assert_eq!(WECHAT.parse_row(&r), Err(RowError::MissingField("timestamp")));
    }

    #[test]
    fn missing_amount_fails_row() {
        let r = row(&[("Date", "2024-01-15"), ("Amount", "")]);
        assert_eq!(WECHAT.parse_row(&r), Err(RowError::MissingField("amount")));
    }

    #[test]
    fn malformed_values_fail_row() {
        let r = row(&[("Date", "soon"), ("Amount", "1")]);
        assert_eq!(
            WECHAT.parse_row(&r),
            Err(RowError::MalformedTimestamp("soon".to_string()))
        );
        let r = row(&[("Date", "2024-01-15"), ("Amount", "lots")]);
        assert_eq!(
            WECHAT.parse_row(&r),
            Err(RowError::MalformedAmount("lots".to_string()))
        );
    }

    #[test]
    fn wechat_ignores_status_column() {
        let r = row(&[("Date", "2024-01-15"), ("Amount", "1"), ("Status", "failed")]);
        assert!(matches!(WECHAT.parse_row(&r), Ok(RowOutcome::Accepted(_))));
    }

    // ── Alipay ────────────────────────────────────────────────────────────────

    #[test]
    fn alipay_full_row() {
        let r = row(&[
            ("交易时间", "2024/02/01 12:00:00"),
            ("交易对方", "Didi"),
            ("金额", "35.50"),
            ("收/支", "支出"),
            ("交易状态", "交易成功"),
        ]);
        let tx = accepted(&ALIPAY, &r);
        assert_eq!(tx.description(), "Didi");
        assert_eq!(tx.amount(), money("35.50"));
        assert_eq!(tx.source(), Source::Alipay);
        assert!(tx.is_expense());
    }

    #[test]
    fn alipay_drops_failed_and_cancelled() {
        for status in ["交易失败", "failed", "FAILED", "Cancelled by user"] {
            let r = row(&[("Date", "2024-01-15"), ("Amount", "5"), ("Status", status)]);
            assert_eq!(
                ALIPAY.parse_row(&r),
                Ok(RowOutcome::Filtered {
                    status: status.to_string()
                }),
                "status {status}"
            );
        }
    }

    #[test]
    fn alipay_keeps_refunds_and_other_statuses() {
        for status in ["已退款", "交易成功", ""] {
            let r = row(&[("Date", "2024-01-15"), ("Amount", "5"), ("交易状态", status)]);
            assert!(matches!(ALIPAY.parse_row(&r), Ok(RowOutcome::Accepted(_))));
        }
    }

    #[test]
    fn alipay_status_alias_priority() {
        let r = row(&[
            ("Date", "2024-01-15"),
            ("Amount", "5"),
            ("Status", "failed"),
            ("交易状态", "交易成功"),
        ]);
        assert!(matches!(ALIPAY.parse_row(&r), Ok(RowOutcome::Accepted(_))));
    }

    #[test]
    fn alipay_malformed_amount_fails_before_status_filter() {
        let r = row(&[("Date", "2024-01-15"), ("Amount", "x"), ("Status", "failed")]);
        assert!(matches!(ALIPAY.parse_row(&r), Err(RowError::MalformedAmount(_))));
    }

    #[test]
    fn amounts_are_never_negative() {
        for text in ["-1", "(2)", "3", "-¥4,000.10", "0"] {
            let r = row(&[("Date", "2024-01-15"), ("Amount", text)]);
            for profile in [&WECHAT, &ALIPAY] {
                let tx = accepted(profile, &r);
                assert!(!tx.amount().is_negative(), "{text}");
            }
        }
    }

    #[test]
    fn for_source_picks_profile() {
        assert_eq!(ProviderProfile::for_source(Source::Wechat), &WECHAT);
        assert_eq!(ProviderProfile::for_source(Source::Alipay), &ALIPAY);
    }
}
