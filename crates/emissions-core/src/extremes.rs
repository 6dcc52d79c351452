//! Max/min row resolution with first-seen tie-breaking.

use crate::error::AggregateError;
use crate::table::{AggregateTable, Row};
use serde::{Deserialize, Serialize};

/// Which extreme to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtremeMode {
    Max,
    Min,
}

impl ExtremeMode {
    fn beats(self, candidate: f64, current: f64) -> bool {
        match self {
            Self::Max => candidate > current,
            Self::Min => candidate < current,
        }
    }
}

/// The row attaining an extreme value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extreme<'a> {
    /// Position of the row in the table
    pub index: usize,
    /// The row itself
    pub row: &'a Row,
    /// Value of the measure column at that row
    pub value: f64,
}

impl Extreme<'_> {
    /// Leading key of the row rendered as text.
    #[must_use]
    pub fn label(&self) -> String {
        self.row.label().map(ToString::to_string).unwrap_or_default()
    }
}

/// Find the row whose `column` is the table-wide max or min.
///
/// When several rows attain the extreme, the one with the smallest index
/// wins. Undefined cells are skipped.
///
/// # Errors
///
/// - `EmptyTable` if the table has no rows
/// - `UnknownColumn` if `column` is not a measure column
/// - `NoDefinedValues` if every cell in `column` is undefined
pub fn arg_extreme<'a>(
    table: &'a AggregateTable,
    column: &str,
    mode: ExtremeMode,
) -> Result<Extreme<'a>, AggregateError> {
    if table.is_empty() {
        return Err(AggregateError::EmptyTable);
    }
    let idx = table.measure_index(column)?;

    let mut found: Option<Extreme<'a>> = None;
    for (index, row) in table.rows().iter().enumerate() {
        let Some(value) = row.measure(idx) else {
            continue;
        };
        if found.map_or(true, |cur| mode.beats(value, cur.value)) {
            found = Some(Extreme { index, row, value });
        }
    }

    found.ok_or_else(|| AggregateError::NoDefinedValues(column.to_string()))
}
