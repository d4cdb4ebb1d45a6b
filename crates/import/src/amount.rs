use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::RowError;

/// Parses an export amount into a signed decimal.
///
/// Currency symbols, thousands separators and spaces are dropped first. A
/// leading `-` or an accounting-style `(` marks the value negative, after
/// which every sign and parenthesis character is removed. A leading `+` is
/// left alone since it already parses as positive.
pub fn normalize_amount(text: &str) -> Result<Decimal, RowError> {
    let cleaned = text.replace(['¥', '$', ',', ' '], "");

    let negative = cleaned.starts_with('-') || cleaned.starts_with('(');
    let digits = cleaned.replace(['-', '(', ')'], "");

    let magnitude = Decimal::from_str(digits.trim())
        .map_err(|_| RowError::MalformedAmount(text.to_string()))?;

    Ok(if negative { -magnitude } else { magnitude })
}
