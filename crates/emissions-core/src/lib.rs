//! Filtering and aggregation engine for greenhouse-gas emission records.
//!
//! The engine reduces a validated record set with [`FilterCriteria`] and
//! derives the tables a dashboard shows:
//! - Grouped sums: [`group_sum`], [`state_totals`], [`top_per_group`]
//! - Shares and pivots: [`percentage`], [`pivot_mean`]
//! - Extremes with first-seen tie-breaking: [`arg_extreme`]
//! - Magnitude strings: [`format_magnitude`]
//!
//! [`Summary`] runs the whole recomputation for one filter selection.
//!
//! # Example
//!
//! ```
//! use emissions_core::{Dataset, FilterCriteria, Record, Summary};
//!
//! let dataset = Dataset::new(vec![
//!     Record::new("SP", (-23.5, -46.6), 2020, "Energia", "CO2", 100.0),
//!     Record::new("MG", (-18.5, -44.6), 2020, "Agropecuária", "CH4", 200.0),
//! ])
//! .unwrap();
//!
//! let criteria = FilterCriteria::full(&dataset.vocabulary());
//! let summary = Summary::from_store(&dataset, &criteria).unwrap();
//! assert_eq!(summary.highlights.unwrap().max_state.label, "MG");
//! ```

mod aggregate;
mod config;
mod error;
mod extremes;
mod filter;
mod format;
mod record;
mod region;
mod store;
mod summary;
mod table;

pub use aggregate::{
    group_sum, percentage, pivot_mean, state_totals, top_per_group, Measure, LATITUDE,
    LONGITUDE, SHARE, TOTAL_EMISSION,
};
pub use config::{DashboardConfig, DataSource};
pub use error::{AggregateError, ConfigError, Error, FormatError, StoreError};
pub use extremes::{arg_extreme, Extreme, ExtremeMode};
pub use filter::{apply, FilterCriteria, FilterSpec, YearRange};
pub use format::format_magnitude;
pub use record::{Dimension, Key, Record};
pub use region::RegionAlias;
pub use store::{DataFormat, Dataset, RecordStore, Vocabulary};
pub use summary::{Highlight, Highlights, Summary};
pub use table::{AggregateTable, Row};
