//! Record store contract and the validated in-memory dataset.

use crate::error::StoreError;
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Serialisation format of a dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(StoreError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Supplier of the validated record sequence.
///
/// Implementations guarantee unique `(state, year, sector, gas)` keys and
/// finite numeric fields. The engine never re-validates.
pub trait RecordStore {
    /// All records in their original order.
    fn all_records(&self) -> &[Record];
}

/// Validated, read-only record set.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Validate and wrap a record sequence.
    ///
    /// # Errors
    ///
    /// Fails on the first duplicate key, non-finite number, negative
    /// emission or empty label. No partial dataset is ever produced.
    pub fn new(records: Vec<Record>) -> Result<Self, StoreError> {
        let mut seen: HashSet<(&str, i32, &str, &str)> = HashSet::with_capacity(records.len());

        for (index, r) in records.iter().enumerate() {
            for (field, value) in [
                ("state", &r.state),
                ("sector", &r.sector),
                ("gas", &r.gas),
            ] {
                if value.trim().is_empty() {
                    return Err(StoreError::EmptyLabel { index, field });
                }
            }

            for (field, value) in [
                ("latitude", r.latitude),
                ("longitude", r.longitude),
                ("emission", r.emission),
            ] {
                if !value.is_finite() {
                    return Err(StoreError::NotFinite { index, field });
                }
            }

            if r.emission < 0.0 {
                return Err(StoreError::NegativeEmission {
                    index,
                    value: r.emission,
                });
            }

            if !seen.insert((r.state.as_str(), r.year, r.sector.as_str(), r.gas.as_str())) {
                return Err(StoreError::DuplicateKey {
                    index,
                    state: r.state.clone(),
                    year: r.year,
                    sector: r.sector.clone(),
                    gas: r.gas.clone(),
                });
            }
        }

        tracing::debug!(records = records.len(), "dataset validated");
        Ok(Self { records })
    }

    /// Parse a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let records: Vec<Record> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// Parse a YAML sequence of records.
    pub fn from_yaml(yaml: &str) -> Result<Self, StoreError> {
        let records: Vec<Record> = serde_yaml_ng::from_str(yaml)?;
        Self::new(records)
    }

    /// Parse text in the given format.
    pub fn parse(text: &str, format: DataFormat) -> Result<Self, StoreError> {
        match format {
            DataFormat::Json => Self::from_json(text),
            DataFormat::Yaml => Self::from_yaml(text),
        }
    }

    /// Load a dataset file, choosing the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        Self::load_as(path, DataFormat::from_path(path)?)
    }

    /// Load a dataset file in an explicit format.
    pub fn load_as(path: impl AsRef<Path>, format: DataFormat) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let dataset = Self::parse(&text, format)?;
        tracing::info!(path = %path.display(), records = dataset.len(), "dataset loaded");
        Ok(dataset)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct values present in the dataset.
    #[must_use]
    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary::from_records(&self.records)
    }
}

impl RecordStore for Dataset {
    fn all_records(&self) -> &[Record] {
        &self.records
    }
}

/// Distinct dimension values of a record set, in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Vocabulary {
    /// Inclusive `(min, max)` year, `None` for an empty record set
    pub years: Option<(i32, i32)>,
    /// Distinct state codes
    pub states: Vec<String>,
    /// Distinct sector labels
    pub sectors: Vec<String>,
    /// Distinct gas labels
    pub gases: Vec<String>,
}

impl Vocabulary {
    /// Collect the vocabulary of a record slice.
    #[must_use]
    pub fn from_records(records: &[Record]) -> Self {
        fn push_new(list: &mut Vec<String>, seen: &mut HashSet<String>, value: &str) {
            if seen.insert(value.to_string()) {
                list.push(value.to_string());
            }
        }

        let mut vocab = Self::default();
        let (mut states, mut sectors, mut gases) =
            (HashSet::new(), HashSet::new(), HashSet::new());

        for r in records {
            push_new(&mut vocab.states, &mut states, &r.state);
            push_new(&mut vocab.sectors, &mut sectors, &r.sector);
            push_new(&mut vocab.gases, &mut gases, &r.gas);
            vocab.years = Some(match vocab.years {
                Some((lo, hi)) => (lo.min(r.year), hi.max(r.year)),
                None => (r.year, r.year),
            });
        }

        vocab
    }
}
