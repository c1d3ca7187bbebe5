// Grouped sums of ledger amounts.
use shared::brazilian_format::parse_monetary_value;
use shared::models::LedgerRow;
use std::collections::HashMap;

/// Totals per group key.
///
/// Keys iterate in the order they were first seen, which is what gives
/// `sort_descending_by_value` its encounter-order tie breaking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationResult {
    entries: Vec<(String, f64)>,
    positions: HashMap<String, usize>,
}

impl AggregationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str, value: f64) {
        match self.positions.get(key) {
            Some(&pos) => self.entries[pos].1 += value,
            None => {
                self.positions.insert(key.to_string(), self.entries.len());
                // -0.0 would sort below 0.0 under total_cmp
                self.entries.push((key.to_string(), 0.0 + value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.positions.get(key).map(|&pos| self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over all groups.
    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }
}

/// Result of one grouping pass: the totals, plus every row that had no key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grouping {
    pub totals: AggregationResult,
    pub unkeyed: Vec<LedgerRow>,
}

/// Sums `value_field` per distinct non-empty `key_field`.
///
/// Rows without the key are not dropped; they come back in `unkeyed`, in input order.
pub fn group_and_sum<'a>(
    rows: impl IntoIterator<Item = &'a LedgerRow>,
    key_field: &str,
    value_field: &str,
) -> Grouping {
    group_and_sum_by(rows, value_field, |row| row.non_empty(key_field))
}

/// Same as [`group_and_sum`] with an arbitrary key selector.
pub fn group_and_sum_by<'a, F>(
    rows: impl IntoIterator<Item = &'a LedgerRow>,
    value_field: &str,
    key_of: F,
) -> Grouping
where
    F: for<'r> Fn(&'r LedgerRow) -> Option<&'r str>,
{
    let mut grouping = Grouping::default();
    for row in rows {
        let value = parse_monetary_value(row.get(value_field));
        match key_of(row).filter(|key| !key.is_empty()) {
            Some(key) => grouping.totals.add(key, value),
            None => grouping.unkeyed.push(row.clone()),
        }
    }
    grouping
}

/// Grand total of a view: every row counts, whether or not it has a group key.
pub fn view_total<'a>(rows: impl IntoIterator<Item = &'a LedgerRow>, value_field: &str) -> f64 {
    rows.into_iter()
        .map(|row| parse_monetary_value(row.get(value_field)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::columns;

    fn row(department: &str, nature: &str, amount: &str) -> LedgerRow {
        LedgerRow::new([
            (columns::DEPARTMENT, department),
            (columns::NATURE, nature),
            (columns::AMOUNT, amount),
        ])
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
    }

    #[test]
    fn test_group_and_sum_routes_unkeyed_rows() {
        let rows = vec![row("A", "X", "10,00"), row("", "X", "5,00"), row("A", "Y", "3,00")];
        let grouping = group_and_sum(&rows, columns::DEPARTMENT, columns::AMOUNT);

        assert_eq!(grouping.totals.len(), 1);
        assert_close(grouping.totals.get("A").unwrap(), 13.0);
        assert_eq!(grouping.unkeyed, vec![rows[1].clone()]);
    }

    #[test]
    fn test_group_and_sum_missing_column_is_unkeyed() {
        let rows = vec![LedgerRow::new([(columns::AMOUNT, "7,00")])];
        let grouping = group_and_sum(&rows, columns::DEPARTMENT, columns::AMOUNT);
        assert!(grouping.totals.is_empty());
        assert_eq!(grouping.unkeyed.len(), 1);
    }

    #[test]
    fn test_group_and_sum_malformed_amount_counts_as_zero() {
        let rows = vec![row("A", "X", "n/d"), row("B", "X", "2,50")];
        let grouping = group_and_sum(&rows, columns::DEPARTMENT, columns::AMOUNT);
        assert_eq!(grouping.totals.get("A"), Some(0.0));
        assert_close(grouping.totals.get("B").unwrap(), 2.5);
    }

    #[test]
    fn test_keys_iterate_in_encounter_order() {
        let rows = vec![row("C", "", "1"), row("A", "", "1"), row("C", "", "1"), row("B", "", "1")];
        let grouping = group_and_sum(&rows, columns::DEPARTMENT, columns::AMOUNT);
        let keys: Vec<&str> = grouping.totals.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_group_and_sum_by_custom_selector() {
        let rows = vec![row("A", "X", "1,00"), row("B", "X", "2,00"), row("C", "Y", "4,00")];
        let grouping = group_and_sum_by(&rows, columns::AMOUNT, |r| r.nature());
        assert_close(grouping.totals.get("X").unwrap(), 3.0);
        assert_close(grouping.totals.get("Y").unwrap(), 4.0);
        assert_close(grouping.totals.sum(), 7.0);
    }

    #[test]
    fn test_view_total_includes_rows_without_nature() {
        let rows = vec![row("A", "X", "10,00"), row("A", "", "2,00")];
        assert_close(view_total(&rows, columns::AMOUNT), 12.0);
        let natures = group_and_sum(&rows, columns::NATURE, columns::AMOUNT);
        assert_close(natures.totals.sum(), 10.0);
    }
}
