//! Named region aliases layered over the state filter.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Region alias resolving to a fixed set of state codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionAlias {
    /// Every state in the dataset
    Brasil,
    /// MG, SP, RJ, ES
    Sudeste,
    /// RS, SC, PR
    Sul,
}

/// Alias name to member states. `None` means "all states".
const ALIAS_TABLE: [(RegionAlias, Option<&[&str]>); 3] = [
    (RegionAlias::Brasil, None),
    (RegionAlias::Sudeste, Some(&["MG", "SP", "RJ", "ES"])),
    (RegionAlias::Sul, Some(&["RS", "SC", "PR"])),
];

impl RegionAlias {
    /// All aliases in table order.
    pub const ALL: [Self; 3] = [Self::Brasil, Self::Sudeste, Self::Sul];

    /// Canonical alias name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Brasil => "Brasil",
            Self::Sudeste => "Sudeste",
            Self::Sul => "Sul",
        }
    }

    /// Fixed member states, or `None` when the alias covers every state.
    #[must_use]
    pub fn members(self) -> Option<&'static [&'static str]> {
        ALIAS_TABLE
            .iter()
            .find(|(alias, _)| *alias == self)
            .and_then(|(_, states)| *states)
    }

    /// Resolve to concrete state codes against the states known to a dataset.
    #[must_use]
    pub fn resolve(self, all_states: &[String]) -> Vec<String> {
        self.members().map_or_else(
            || all_states.to_vec(),
            |states| states.iter().map(ToString::to_string).collect(),
        )
    }
}

impl fmt::Display for RegionAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RegionAlias {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "brasil" | "brazil" => Ok(Self::Brasil),
            "sudeste" | "southeast" => Ok(Self::Sudeste),
            "sul" | "south" => Ok(Self::Sul),
            _ => Err(ConfigError::UnknownRegion(s.to_string())),
        }
    }
}
