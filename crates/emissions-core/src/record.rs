//! Emission records and the dimensions they are grouped by.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One emission observation.
///
/// `(state, year, sector, gas)` identifies a record within a dataset and the
/// coordinate pair is expected to be constant per state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Region code (e.g. `SP`)
    #[serde(alias = "Estado")]
    pub state: String,
    /// Latitude of the state's reference point
    #[serde(alias = "lat")]
    pub latitude: f64,
    /// Longitude of the state's reference point
    #[serde(alias = "long")]
    pub longitude: f64,
    /// Observation year
    #[serde(alias = "Ano")]
    pub year: i32,
    /// Emission sector label
    #[serde(alias = "Setor de emissão")]
    pub sector: String,
    /// Gas label
    #[serde(alias = "Gás")]
    pub gas: String,
    /// Emission in tonnes
    #[serde(alias = "Emissão")]
    pub emission: f64,
}

impl Record {
    /// Create a new record.
    #[must_use]
    pub fn new(
        state: impl Into<String>,
        (latitude, longitude): (f64, f64),
        year: i32,
        sector: impl Into<String>,
        gas: impl Into<String>,
        emission: f64,
    ) -> Self {
        Self {
            state: state.into(),
            latitude,
            longitude,
            year,
            sector: sector.into(),
            gas: gas.into(),
            emission,
        }
    }

    /// Project this record onto a grouping dimension.
    #[must_use]
    pub fn key(&self, dimension: Dimension) -> Key {
        match dimension {
            Dimension::State => Key::Text(self.state.clone()),
            Dimension::Sector => Key::Text(self.sector.clone()),
            Dimension::Gas => Key::Text(self.gas.clone()),
            Dimension::Year => Key::Year(self.year),
        }
    }
}

/// A field records can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    State,
    Sector,
    Year,
    Gas,
}

impl Dimension {
    /// All dimensions in declaration order.
    pub const ALL: [Self; 4] = [Self::State, Self::Sector, Self::Year, Self::Gas];

    /// Column name used in aggregate tables.
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Sector => "sector",
            Self::Year => "year",
            Self::Gas => "gas",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Dimension {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "state" | "estado" => Ok(Self::State),
            "sector" | "setor" => Ok(Self::Sector),
            "year" | "ano" => Ok(Self::Year),
            "gas" | "gás" => Ok(Self::Gas),
            _ => Err(ConfigError::UnknownDimension(s.to_string())),
        }
    }
}

/// A grouping-key value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// Year key
    Year(i32),
    /// Categorical key (state, sector, gas)
    Text(String),
}

impl Key {
    /// Get as text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Year(_) => None,
        }
    }

    /// Get as year.
    #[must_use]
    pub const fn as_year(&self) -> Option<i32> {
        match self {
            Self::Year(y) => Some(*y),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(y) => write!(f, "{y}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Key {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<i32> for Key {
    fn from(v: i32) -> Self {
        Self::Year(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record::new("SP", (-23.5, -46.6), 2020, "Energia", "CO2", 100.0)
    }

    #[test]
    fn test_record_key_projection() {
        let r = sample();
        assert_eq!(r.key(Dimension::State), Key::from("SP"));
        assert_eq!(r.key(Dimension::Sector), Key::from("Energia"));
        assert_eq!(r.key(Dimension::Gas), Key::from("CO2"));
        assert_eq!(r.key(Dimension::Year), Key::Year(2020));
    }

    #[test]
    fn test_dimension_parse() {
        assert_eq!("state".parse::<Dimension>().unwrap(), Dimension::State);
        assert_eq!("Ano".parse::<Dimension>().unwrap(), Dimension::Year);
        assert_eq!("GÁS".parse::<Dimension>().unwrap(), Dimension::Gas);
        assert!(matches!(
            "colour".parse::<Dimension>(),
            Err(ConfigError::UnknownDimension(_))
        ));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::Year(1990).to_string(), "1990");
        assert_eq!(Key::from("MG").to_string(), "MG");
        assert_eq!(Key::from("MG").as_text(), Some("MG"));
        assert_eq!(Key::Year(1990).as_year(), Some(1990));
    }

    #[test]
    fn test_record_deserialize_original_headers() {
        let json = r#"{
            "Estado": "MG", "lat": -18.5, "long": -44.6, "Ano": 2019,
            "Setor de emissão": "Agropecuária", "Gás": "CH4", "Emissão": 200.0
        }"#;
        let r: Record = serde_json::from_str(json).unwrap();
        assert_eq!(r.state, "MG");
        assert_eq!(r.year, 2019);
        assert_eq!(r.sector, "Agropecuária");
        assert_eq!(r.emission, 200.0);
    }

    #[test]
    fn test_key_serializes_untagged() {
        let keys = vec![Key::Year(2020), Key::from("SP")];
        assert_eq!(serde_json::to_string(&keys).unwrap(), r#"[2020,"SP"]"#);
    }
}
