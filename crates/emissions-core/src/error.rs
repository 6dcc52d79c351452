//! Error types for the emissions engine.

use thiserror::Error;

/// Errors raised while loading or validating a record set.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error while reading a dataset file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML decoding error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// File extension does not map to a known format.
    #[error("unsupported dataset format: {0}")]
    UnsupportedFormat(String),

    /// Two records share the same `(state, year, sector, gas)` key.
    #[error("duplicate record at index {index}: ({state}, {year}, {sector}, {gas})")]
    DuplicateKey {
        index: usize,
        state: String,
        year: i32,
        sector: String,
        gas: String,
    },

    /// A numeric field is NaN or infinite.
    #[error("record {index}: field '{field}' is not a finite number")]
    NotFinite { index: usize, field: &'static str },

    /// Emission below zero.
    #[error("record {index}: emission must be non-negative, got {value}")]
    NegativeEmission { index: usize, value: f64 },

    /// A categorical label is empty.
    #[error("record {index}: field '{field}' is empty")]
    EmptyLabel { index: usize, field: &'static str },
}

/// Errors raised while building filter criteria or reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Region alias name is not in the alias table.
    #[error("unknown region alias: {0}")]
    UnknownRegion(String),

    /// Year range lower bound exceeds the upper bound.
    #[error("invalid year range: {min} > {max}")]
    InvalidYearRange { min: i32, max: i32 },

    /// Both an explicit state list and a region alias were given.
    #[error("states and region are mutually exclusive")]
    ConflictingStateSelection,

    /// Dimension name not recognised.
    #[error("unknown dimension: {0}")]
    UnknownDimension(String),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// IO error while reading a config file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by operations over an aggregate table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// Extremes requested on a table with zero rows.
    #[error("table is empty")]
    EmptyTable,

    /// Named measure column does not exist.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// Rows exist but every cell in the column is undefined.
    #[error("column '{0}' has no defined values")]
    NoDefinedValues(String),
}

/// Errors raised by the magnitude formatter.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FormatError {
    /// Negative input is outside the formatter's domain.
    #[error("cannot format negative magnitude {0}")]
    Negative(f64),

    /// NaN or infinite input.
    #[error("cannot format non-finite magnitude")]
    NotFinite,
}

/// Top-level error for callers that chain several stages.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::DuplicateKey {
            index: 1,
            state: "SP".to_string(),
            year: 2020,
            sector: "Energia".to_string(),
            gas: "CO2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "duplicate record at index 1: (SP, 2020, Energia, CO2)"
        );

        let err = StoreError::NotFinite {
            index: 3,
            field: "latitude",
        };
        assert_eq!(
            err.to_string(),
            "record 3: field 'latitude' is not a finite number"
        );
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::UnknownRegion("Norte".to_string()).to_string(),
            "unknown region alias: Norte"
        );
        assert_eq!(
            ConfigError::InvalidYearRange { min: 2021, max: 2000 }.to_string(),
            "invalid year range: 2021 > 2000"
        );
    }

    #[test]
    fn test_aggregate_error_display() {
        assert_eq!(AggregateError::EmptyTable.to_string(), "table is empty");
        assert_eq!(
            AggregateError::UnknownColumn("share".to_string()).to_string(),
            "unknown column: share"
        );
    }

    #[test]
    fn test_error_is_transparent() {
        let err: Error = AggregateError::EmptyTable.into();
        assert_eq!(err.to_string(), "table is empty");
    }
}
