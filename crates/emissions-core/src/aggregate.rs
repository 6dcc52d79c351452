//! Grouped sums, top-per-group tables, percentage shares and pivots.
//!
//! Every function takes the filtered working set and returns a fresh
//! [`AggregateTable`]. Groups appear in the order their key is first seen
//! in the input.

use crate::error::AggregateError;
use crate::record::{Dimension, Key, Record};
use crate::table::AggregateTable;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Summed emission column.
pub const TOTAL_EMISSION: &str = "total_emission";
/// Percentage share column.
pub const SHARE: &str = "share";
/// Representative latitude column of enriched state totals.
pub const LATITUDE: &str = "latitude";
/// Representative longitude column of enriched state totals.
pub const LONGITUDE: &str = "longitude";

/// Numeric record field that can be averaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    #[default]
    Emission,
    Latitude,
    Longitude,
}

impl Measure {
    /// Read the measure off a record.
    #[must_use]
    pub fn of(self, record: &Record) -> f64 {
        match self {
            Self::Emission => record.emission,
            Self::Latitude => record.latitude,
            Self::Longitude => record.longitude,
        }
    }
}

struct Group<'a, K> {
    key: K,
    sum: f64,
    count: usize,
    first: &'a Record,
}

/// Partition by `key_of`, keeping first-appearance order.
fn accumulate<'a, K, F>(records: &[&'a Record], measure: Measure, key_of: F) -> Vec<Group<'a, K>>
where
    K: Hash + Eq + Clone,
    F: Fn(&Record) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Group<'a, K>> = Vec::new();

    for &record in records {
        let key = key_of(record);
        let value = measure.of(record);
        if let Some(&i) = index.get(&key) {
            groups[i].sum += value;
            groups[i].count += 1;
        } else {
            index.insert(key.clone(), groups.len());
            groups.push(Group {
                key,
                sum: value,
                count: 1,
                first: record,
            });
        }
    }

    groups
}

/// Sum emissions per distinct value of `key`.
///
/// The column total always equals the sum of the input emissions.
#[must_use]
pub fn group_sum(records: &[&Record], key: Dimension) -> AggregateTable {
    let mut table = AggregateTable::new([key.column_name()], [TOTAL_EMISSION]);
    for group in accumulate(records, Measure::Emission, |r| r.key(key)) {
        table.push(vec![group.key], vec![Some(group.sum)]);
    }
    tracing::debug!(dimension = %key, groups = table.len(), "group sum");
    table
}

/// State totals joined to one coordinate pair per state.
///
/// The pair comes from the first record seen for the state. Records that
/// disagree with it are reported and otherwise ignored.
#[must_use]
pub fn state_totals(records: &[&Record]) -> AggregateTable {
    let groups = accumulate(records, Measure::Emission, |r| r.state.clone());

    let first_coords: HashMap<&str, (f64, f64)> = groups
        .iter()
        .map(|g| (g.key.as_str(), (g.first.latitude, g.first.longitude)))
        .collect();
    let mut reported: HashSet<&str> = HashSet::new();
    for r in records {
        let Some(&(lat, lon)) = first_coords.get(r.state.as_str()) else {
            continue;
        };
        if (r.latitude, r.longitude) != (lat, lon) && reported.insert(r.state.as_str()) {
            tracing::warn!(
                state = %r.state,
                kept = ?(lat, lon),
                found = ?(r.latitude, r.longitude),
                "inconsistent coordinates for state, keeping first seen"
            );
        }
    }

    let mut table = AggregateTable::new(
        [Dimension::State.column_name()],
        [LATITUDE, LONGITUDE, TOTAL_EMISSION],
    );
    for g in &groups {
        table.push(
            vec![Key::Text(g.key.clone())],
            vec![
                Some(g.first.latitude),
                Some(g.first.longitude),
                Some(g.sum),
            ],
        );
    }
    table
}

/// For each `outer` value, the `inner` value with the largest summed emission.
///
/// Sums are grouped by `(outer, inner)`; on equal sums the pair seen first
/// wins. Output rows follow the first appearance of each `outer` value.
#[must_use]
pub fn top_per_group(records: &[&Record], outer: Dimension, inner: Dimension) -> AggregateTable {
    let pairs = accumulate(records, Measure::Emission, |r| (r.key(outer), r.key(inner)));

    let mut best: Vec<usize> = Vec::new();
    let mut slot: HashMap<&Key, usize> = HashMap::new();
    for (i, pair) in pairs.iter().enumerate() {
        match slot.get(&pair.key.0) {
            Some(&s) => {
                if pair.sum > pairs[best[s]].sum {
                    best[s] = i;
                }
            }
            None => {
                slot.insert(&pair.key.0, best.len());
                best.push(i);
            }
        }
    }

    let mut table = AggregateTable::new(
        [outer.column_name(), inner.column_name()],
        [TOTAL_EMISSION],
    );
    for i in best {
        let (o, n) = pairs[i].key.clone();
        table.push(vec![o, n], vec![Some(pairs[i].sum)]);
    }
    table
}

/// Append a `share` column: `100 * value / total` of `column`.
///
/// With a zero total every share is undefined rather than NaN. Undefined
/// input cells stay undefined and do not count towards the total.
pub fn percentage(table: &AggregateTable, column: &str) -> Result<AggregateTable, AggregateError> {
    let values = table.column(column)?;
    let total: f64 = values.iter().flatten().sum();

    let shares: Vec<Option<f64>> = if total > 0.0 {
        values.iter().map(|v| v.map(|x| 100.0 * x / total)).collect()
    } else {
        tracing::warn!(column, rows = values.len(), "zero total, shares undefined");
        vec![None; values.len()]
    };

    Ok(table.clone().with_measure(SHARE, shares))
}

/// Mean of `measure` indexed by `row` with one column per distinct `col` value.
///
/// Cells with no matching record are undefined, not zero. Rows and columns
/// follow first appearance.
#[must_use]
pub fn pivot_mean(
    records: &[&Record],
    row: Dimension,
    col: Dimension,
    measure: Measure,
) -> AggregateTable {
    let cells = accumulate(records, measure, |r| (r.key(row), r.key(col)));

    let mut row_keys: Vec<Key> = Vec::new();
    let mut col_keys: Vec<Key> = Vec::new();
    let mut means: HashMap<(&Key, &Key), f64> = HashMap::new();
    for cell in &cells {
        let (r, c) = &cell.key;
        if !row_keys.contains(r) {
            row_keys.push(r.clone());
        }
        if !col_keys.contains(c) {
            col_keys.push(c.clone());
        }
        means.insert((r, c), cell.sum / cell.count as f64);
    }

    let mut table = AggregateTable::new(
        [row.column_name()],
        col_keys.iter().map(ToString::to_string),
    );
    for r in &row_keys {
        let values = col_keys.iter().map(|c| means.get(&(r, c)).copied()).collect();
        table.push(vec![r.clone()], values);
    }
    tracing::debug!(rows = table.len(), columns = col_keys.len(), "pivot built");
    table
}
