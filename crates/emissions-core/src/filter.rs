//! Filter criteria and the filter engine.

use crate::error::ConfigError;
use crate::record::Record;
use crate::region::RegionAlias;
use crate::store::Vocabulary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive year bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    min: i32,
    max: i32,
}

impl YearRange {
    /// Create a year range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidYearRange` when `min > max`.
    pub fn new(min: i32, max: i32) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvalidYearRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> i32 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> i32 {
        self.max
    }

    /// Check if a year falls inside the bounds.
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}

/// Resolved, immutable reduction over a record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    year_range: YearRange,
    sectors: BTreeSet<String>,
    gases: BTreeSet<String>,
    states: BTreeSet<String>,
}

impl FilterCriteria {
    /// Create criteria from explicit sets.
    #[must_use]
    pub fn new<S: Into<String>>(
        year_range: YearRange,
        sectors: impl IntoIterator<Item = S>,
        gases: impl IntoIterator<Item = S>,
        states: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            year_range,
            sectors: sectors.into_iter().map(Into::into).collect(),
            gases: gases.into_iter().map(Into::into).collect(),
            states: states.into_iter().map(Into::into).collect(),
        }
    }

    /// Criteria that keep every record of the vocabulary.
    #[must_use]
    pub fn full(vocab: &Vocabulary) -> Self {
        let (min, max) = vocab.years.unwrap_or((0, 0));
        Self {
            year_range: YearRange { min, max },
            sectors: vocab.sectors.iter().cloned().collect(),
            gases: vocab.gases.iter().cloned().collect(),
            states: vocab.states.iter().cloned().collect(),
        }
    }

    /// Year bounds.
    #[must_use]
    pub const fn year_range(&self) -> YearRange {
        self.year_range
    }

    /// Allowed sectors.
    #[must_use]
    pub const fn sectors(&self) -> &BTreeSet<String> {
        &self.sectors
    }

    /// Allowed gases.
    #[must_use]
    pub const fn gases(&self) -> &BTreeSet<String> {
        &self.gases
    }

    /// Allowed states.
    #[must_use]
    pub const fn states(&self) -> &BTreeSet<String> {
        &self.states
    }

    /// Check if a single record passes every predicate.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.year_range.contains(record.year)
            && self.sectors.contains(&record.sector)
            && self.gases.contains(&record.gas)
            && self.states.contains(&record.state)
    }
}

/// Keep the records matching `criteria`, preserving input order.
///
/// An empty result is valid and returned as such.
pub fn apply<'a>(records: &'a [Record], criteria: &FilterCriteria) -> Vec<&'a Record> {
    let kept: Vec<&Record> = records.iter().filter(|r| criteria.matches(r)).collect();
    tracing::debug!(total = records.len(), kept = kept.len(), "filter applied");
    kept
}

/// Raw filter input as supplied by a UI or config file.
///
/// Absent fields mean "everything the dataset contains".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSpec {
    /// Inclusive `[min, max]` years
    #[serde(default)]
    pub years: Option<(i32, i32)>,
    /// Allowed sectors
    #[serde(default)]
    pub sectors: Option<Vec<String>>,
    /// Allowed gases
    #[serde(default)]
    pub gases: Option<Vec<String>>,
    /// Allowed states
    #[serde(default)]
    pub states: Option<Vec<String>>,
    /// Region alias name, exclusive with `states`
    #[serde(default)]
    pub region: Option<String>,
}

impl FilterSpec {
    /// Parse the region alias, if one is set.
    ///
    /// # Errors
    ///
    /// Unknown alias names and alias-plus-states combinations are rejected.
    pub fn region_alias(&self) -> Result<Option<RegionAlias>, ConfigError> {
        match (&self.region, &self.states) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingStateSelection),
            (Some(name), None) => name.parse().map(Some),
            (None, _) => Ok(None),
        }
    }

    /// Resolve into concrete criteria against a dataset's vocabulary.
    ///
    /// # Errors
    ///
    /// Inverted year bounds, unknown regions and conflicting state
    /// selections are configuration errors.
    pub fn resolve(&self, vocab: &Vocabulary) -> Result<FilterCriteria, ConfigError> {
        let year_range = match self.years {
            Some((min, max)) => YearRange::new(min, max)?,
            None => FilterCriteria::full(vocab).year_range,
        };

        let states = match self.region_alias()? {
            Some(alias) => alias.resolve(&vocab.states),
            None => self.states.clone().unwrap_or_else(|| vocab.states.clone()),
        };

        let criteria = FilterCriteria::new(
            year_range,
            self.sectors.clone().unwrap_or_else(|| vocab.sectors.clone()),
            self.gases.clone().unwrap_or_else(|| vocab.gases.clone()),
            states,
        );

        tracing::debug!(
            years = ?(criteria.year_range.min, criteria.year_range.max),
            sectors = criteria.sectors.len(),
            gases = criteria.gases.len(),
            states = criteria.states.len(),
            "filter criteria resolved"
        );
        Ok(criteria)
    }
}
