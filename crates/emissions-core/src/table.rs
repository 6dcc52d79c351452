//! Ordered aggregate tables.

use crate::error::AggregateError;
use crate::record::Key;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// One table row: grouping-key values followed by measures.
///
/// A `None` measure is undefined, which is distinct from zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    /// Grouping-key values, one per key column
    pub keys: Vec<Key>,
    /// Measure values, one per measure column
    pub measures: Vec<Option<f64>>,
}

impl Row {
    /// First grouping-key value.
    #[must_use]
    pub fn label(&self) -> Option<&Key> {
        self.keys.first()
    }

    /// Measure at position `index`, `None` when undefined or out of range.
    #[must_use]
    pub fn measure(&self, index: usize) -> Option<f64> {
        self.measures.get(index).copied().flatten()
    }
}

/// Ordered sequence of grouped measure rows.
///
/// Tables are built once by the aggregation functions and never mutated
/// afterwards; every transformation returns a new table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregateTable {
    key_columns: Vec<String>,
    measure_columns: Vec<String>,
    rows: Vec<Row>,
}

impl AggregateTable {
    /// Create an empty table with the given columns.
    #[must_use]
    pub fn new<K, M>(
        key_columns: impl IntoIterator<Item = K>,
        measure_columns: impl IntoIterator<Item = M>,
    ) -> Self
    where
        K: Into<String>,
        M: Into<String>,
    {
        Self {
            key_columns: key_columns.into_iter().map(Into::into).collect(),
            measure_columns: measure_columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, keys: Vec<Key>, measures: Vec<Option<f64>>) {
        debug_assert_eq!(keys.len(), self.key_columns.len());
        debug_assert_eq!(measures.len(), self.measure_columns.len());
        self.rows.push(Row { keys, measures });
    }

    /// Grouping-key column names.
    #[must_use]
    pub fn key_columns(&self) -> &[String] {
        &self.key_columns
    }

    /// Measure column names.
    #[must_use]
    pub fn measure_columns(&self) -> &[String] {
        &self.measure_columns
    }

    /// Rows in table order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a measure column.
    pub fn measure_index(&self, column: &str) -> Result<usize, AggregateError> {
        self.measure_columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| AggregateError::UnknownColumn(column.to_string()))
    }

    /// Position of a key column.
    #[must_use]
    pub fn key_index(&self, column: &str) -> Option<usize> {
        self.key_columns.iter().position(|c| c == column)
    }

    /// All cells of a measure column in row order.
    pub fn column(&self, column: &str) -> Result<Vec<Option<f64>>, AggregateError> {
        let idx = self.measure_index(column)?;
        Ok(self.rows.iter().map(|r| r.measure(idx)).collect())
    }

    /// Sum of the defined cells of a measure column.
    pub fn total(&self, column: &str) -> Result<f64, AggregateError> {
        Ok(self.column(column)?.into_iter().flatten().sum())
    }

    /// First row whose leading key equals `key`.
    #[must_use]
    pub fn find(&self, key: &Key) -> Option<&Row> {
        self.rows.iter().find(|r| r.label() == Some(key))
    }

    /// Cell lookup by leading key and measure column.
    #[must_use]
    pub fn value(&self, key: &Key, column: &str) -> Option<f64> {
        let idx = self.measure_index(column).ok()?;
        self.find(key)?.measure(idx)
    }

    /// New table with an extra measure column appended.
    pub(crate) fn with_measure(mut self, column: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(values.len(), self.rows.len());
        self.measure_columns.push(column.into());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.measures.push(value);
        }
        self
    }

    /// New table with rows stably sorted ascending by a key column.
    ///
    /// Rows with equal keys keep their relative order. Unknown columns
    /// return the table unchanged.
    #[must_use]
    pub fn sorted_by_key(&self, column: &str) -> Self {
        let mut sorted = self.clone();
        if let Some(idx) = self.key_index(column) {
            sorted.rows.sort_by(|a, b| a.keys[idx].cmp(&b.keys[idx]));
        }
        sorted
    }
}

struct RowView<'a> {
    table: &'a AggregateTable,
    row: &'a Row,
}

impl Serialize for RowView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.table.key_columns.len() + self.table.measure_columns.len();
        let mut map = serializer.serialize_map(Some(len))?;
        for (name, key) in self.table.key_columns.iter().zip(&self.row.keys) {
            map.serialize_entry(name, key)?;
        }
        for (name, value) in self.table.measure_columns.iter().zip(&self.row.measures) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Serialises as an array of `{column: value}` objects; undefined cells
/// become `null`.
impl Serialize for AggregateTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&RowView { table: self, row })?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AggregateTable {
        let mut t = AggregateTable::new(["year"], ["total_emission"]);
        t.push(vec![Key::Year(2021)], vec![Some(5.0)]);
        t.push(vec![Key::Year(2019)], vec![Some(3.0)]);
        t.push(vec![Key::Year(2020)], vec![None]);
        t.push(vec![Key::Year(2019)], vec![Some(1.0)]);
        t
    }

    #[test]
    fn test_table_columns() {
        let t = sample();
        assert_eq!(t.key_columns(), ["year"]);
        assert_eq!(t.measure_columns(), ["total_emission"]);
        assert_eq!(t.len(), 4);
        assert!(!t.is_empty());
        assert!(AggregateTable::new(["a"], ["b"]).is_empty());
    }

    #[test]
    fn test_measure_index_unknown() {
        assert_eq!(
            sample().measure_index("share"),
            Err(AggregateError::UnknownColumn("share".to_string()))
        );
    }

    #[test]
    fn test_total_skips_undefined() {
        assert_eq!(sample().total("total_emission").unwrap(), 9.0);
    }

    #[test]
    fn test_find_and_value() {
        let t = sample();
        assert_eq!(t.value(&Key::Year(2019), "total_emission"), Some(3.0));
        assert_eq!(t.value(&Key::Year(2020), "total_emission"), None);
        assert!(t.find(&Key::Year(1999)).is_none());
    }

    #[test]
    fn test_sorted_by_key_is_stable() {
        let sorted = sample().sorted_by_key("year");
        let cells: Vec<Option<f64>> = sorted.column("total_emission").unwrap();
        assert_eq!(cells, vec![Some(3.0), Some(1.0), None, Some(5.0)]);
    }

    #[test]
    fn test_with_measure_appends_column() {
        let t = sample().with_measure("share", vec![Some(1.0), None, None, Some(2.0)]);
        assert_eq!(t.measure_columns(), ["total_emission", "share"]);
        assert_eq!(t.rows()[3].measure(1), Some(2.0));
    }

    #[test]
    fn test_serialize_rows_as_objects() {
        let mut t = AggregateTable::new(["state"], ["total_emission", "share"]);
        t.push(vec![Key::from("SP")], vec![Some(100.0), None]);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"[{"state":"SP","total_emission":100.0,"share":null}]"#);
    }
}
