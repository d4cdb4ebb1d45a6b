use csv::StringRecord;

/// One CSV data row keyed by its header names, in column order.
///
/// A repeated header name keeps its first position but takes the later value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs a header with one record. Columns the record is too short to
    /// fill are present with an empty value; surplus values are dropped.
    pub fn from_record(headers: &StringRecord, record: &StringRecord) -> Self {
        headers
            .iter()
            .enumerate()
            .map(|(idx, column)| (column, record.get(idx).unwrap_or_default()))
            .collect()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(c, _)| *c == column) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((column, value)),
        }
    }

    /// Raw value of a column, empty or not.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Whether any of `aliases` names a column of this row, whatever its value.
    pub fn has_any(&self, aliases: &[&str]) -> bool {
        aliases.iter().any(|alias| self.contains(alias))
    }

    /// First non-empty value among `aliases`, checked in alias order.
    pub fn lookup(&self, aliases: &[&str]) -> Option<&str> {
        aliases
            .iter()
            .filter_map(|alias| self.get(alias))
            .find(|value| !value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

/// Looks up a logical field in `row` under an ordered alias list.
///
/// Earlier aliases win regardless of where their columns sit in the row. A
/// column that exists but holds an empty string counts as absent. `None` is
/// not an error; the caller decides whether the field is mandatory.
pub fn lookup<'a>(row: &'a RawRow, aliases: &[&str]) -> Option<&'a str> {
    row.lookup(aliases)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs.iter().copied().collect()
    }

    #[test]
    fn first_alias_wins_regardless_of_column_order() {
        let r = row(&[("Date", "2024-01-02"), ("时间", "2024-01-01 08:00:00")]);
        assert_eq!(lookup(&r, &["时间", "Date"]), Some("2024-01-01 08:00:00"));
        assert_eq!(lookup(&r, &["Date", "时间"]), Some("2024-01-02"));
    }

    #[test]
    fn empty_value_falls_through_to_next_alias() {
        let r = row(&[("金额", ""), ("Amount", "12.00")]);
        assert_eq!(lookup(&r, &["金额", "Amount"]), Some("12.00"));
    }

    #[test]
    fn whitespace_value_is_not_empty() {
        let r = row(&[("Amount", " ")]);
        assert_eq!(lookup(&r, &["Amount"]), Some(" "));
    }

    #[test]
    fn no_match_is_none() {
        let r = row(&[("Other", "x"), ("Amount", "")]);
        assert_eq!(lookup(&r, &["Amount", "Money"]), None);
        assert_eq!(lookup(&r, &[]), None);
    }

    #[test]
    fn has_any_ignores_values() {
        let r = row(&[("Type", "")]);
        assert!(r.has_any(&["收/支", "Type"]));
        assert!(!r.has_any(&["收/支"]));
    }

    #[test]
    fn repeated_column_takes_later_value() {
        let r = row(&[("Amount", "1"), ("Note", "n"), ("Amount", "2")]);
        assert_eq!(r.len(), 2);
        assert_eq!(r.get("Amount"), Some("2"));
        assert_eq!(r.iter().next(), Some(("Amount", "2")));
    }

    #[test]
    fn from_record_pads_short_rows() {
        let headers = StringRecord::from(vec!["a", "b", "c"]);
        let record = StringRecord::from(vec!["1"]);
        let r = RawRow::from_record(&headers, &record);
        assert_eq!(r.get("a"), Some("1"));
        assert_eq!(r.get("c"), Some(""));
        assert!(r.contains("b"));
    }

    #[test]
    fn from_record_drops_surplus_values() {
        let headers = StringRecord::from(vec!["a"]);
        let record = StringRecord::from(vec!["1", "2", "3"]);
        let r = RawRow::from_record(&headers, &record);
        assert_eq!(r.len(), 1);
    }
}
