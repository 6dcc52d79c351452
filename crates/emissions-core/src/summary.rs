//! Full dashboard recomputation for one set of filter criteria.

use crate::aggregate::{self, Measure, TOTAL_EMISSION};
use crate::error::{AggregateError, FormatError};
use crate::extremes::{arg_extreme, ExtremeMode};
use crate::filter::{self, FilterCriteria};
use crate::format::format_magnitude;
use crate::record::{Dimension, Record};
use crate::store::RecordStore;
use crate::table::AggregateTable;
use serde::Serialize;

/// Label and value of an extremal row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    /// Leading key of the row (year, gas, state or sector)
    pub label: String,
    /// Total emission of that row
    pub value: f64,
}

impl Highlight {
    fn resolve(table: &AggregateTable, mode: ExtremeMode) -> Result<Self, AggregateError> {
        let e = arg_extreme(table, TOTAL_EMISSION, mode)?;
        Ok(Self {
            label: e.label(),
            value: e.value,
        })
    }
}

/// Extremal rows shown next to the tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlights {
    pub max_year: Highlight,
    pub min_year: Highlight,
    pub max_gas: Highlight,
    pub min_gas: Highlight,
    pub max_state: Highlight,
    pub min_state: Highlight,
    pub max_sector: Highlight,
}

/// Every derived table for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Records in the working subset
    pub record_count: usize,
    /// Total emission of the working subset
    pub total_emission: f64,
    /// `(state, latitude, longitude, total_emission)`
    pub state_totals: AggregateTable,
    /// `(sector, total_emission)`
    pub sector_totals: AggregateTable,
    /// `(year, total_emission)`, ascending by year
    pub year_totals: AggregateTable,
    /// `(gas, total_emission, share)`
    pub gas_totals: AggregateTable,
    /// Dominant gas per state
    pub state_top_gas: AggregateTable,
    /// Dominant sector per state
    pub state_top_sector: AggregateTable,
    /// Mean emission per year and gas, rows ascending by year
    pub year_gas_pivot: AggregateTable,
    /// `None` when the filters exclude every record
    pub highlights: Option<Highlights>,
}

impl Summary {
    /// Filter `records` and compute every table and highlight.
    ///
    /// An empty working subset is not an error: tables come back empty and
    /// `highlights` is `None`.
    pub fn compute(records: &[Record], criteria: &FilterCriteria) -> Result<Self, AggregateError> {
        let working = filter::apply(records, criteria);
        Self::from_working_set(&working)
    }

    /// Same as [`Summary::compute`] over a record store.
    pub fn from_store(
        store: &impl RecordStore,
        criteria: &FilterCriteria,
    ) -> Result<Self, AggregateError> {
        Self::compute(store.all_records(), criteria)
    }

    /// Compute every table over an already filtered working set.
    pub fn from_working_set(working: &[&Record]) -> Result<Self, AggregateError> {
        let year_col = Dimension::Year.column_name();

        let state_totals = aggregate::state_totals(working);
        let sector_totals = aggregate::group_sum(working, Dimension::Sector);
        let year_totals = aggregate::group_sum(working, Dimension::Year).sorted_by_key(year_col);
        let gas_totals =
            aggregate::percentage(&aggregate::group_sum(working, Dimension::Gas), TOTAL_EMISSION)?;

        let highlights = match Highlights::resolve(
            &year_totals,
            &gas_totals,
            &state_totals,
            &sector_totals,
        ) {
            Ok(h) => Some(h),
            Err(AggregateError::EmptyTable) => {
                tracing::info!("no data for current filters");
                None
            }
            Err(e) => return Err(e),
        };

        let summary = Self {
            record_count: working.len(),
            total_emission: working.iter().map(|r| r.emission).sum(),
            state_top_gas: aggregate::top_per_group(working, Dimension::State, Dimension::Gas),
            state_top_sector: aggregate::top_per_group(
                working,
                Dimension::State,
                Dimension::Sector,
            ),
            year_gas_pivot: aggregate::pivot_mean(
                working,
                Dimension::Year,
                Dimension::Gas,
                Measure::Emission,
            )
            .sorted_by_key(year_col),
            state_totals,
            sector_totals,
            year_totals,
            gas_totals,
            highlights,
        };

        tracing::debug!(
            records = summary.record_count,
            total = summary.total_emission,
            states = summary.state_totals.len(),
            "summary computed"
        );
        Ok(summary)
    }

    /// Check if the filters excluded every record.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Total emission rendered by the magnitude formatter.
    pub fn formatted_total(&self) -> Result<String, FormatError> {
        format_magnitude(self.total_emission)
    }
}

impl Highlights {
    fn resolve(
        years: &AggregateTable,
        gases: &AggregateTable,
        states: &AggregateTable,
        sectors: &AggregateTable,
    ) -> Result<Self, AggregateError> {
        Ok(Self {
            max_year: Highlight::resolve(years, ExtremeMode::Max)?,
            min_year: Highlight::resolve(years, ExtremeMode::Min)?,
            max_gas: Highlight::resolve(gases, ExtremeMode::Max)?,
            min_gas: Highlight::resolve(gases, ExtremeMode::Min)?,
            max_state: Highlight::resolve(states, ExtremeMode::Max)?,
            min_state: Highlight::resolve(states, ExtremeMode::Min)?,
            max_sector: Highlight::resolve(sectors, ExtremeMode::Max)?,
        })
    }
}
