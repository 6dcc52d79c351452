//! YAML dashboard configuration.

use crate::error::ConfigError;
use crate::filter::FilterSpec;
use crate::store::DataFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Dashboard configuration loaded from a YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Config schema version
    pub emissions: String,
    /// Dashboard title
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Where the records come from
    pub data: DataSource,
    /// Default filter selection
    #[serde(default)]
    pub filters: FilterSpec,
}

/// Dataset location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    /// Path to the dataset, relative to the config file
    pub source: PathBuf,
    /// Explicit format; inferred from the extension when absent
    #[serde(default)]
    pub format: Option<DataFormat>,
}

impl DashboardConfig {
    /// Parse and validate a YAML config.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = Self::from_yaml(&std::fs::read_to_string(path)?)?;
        tracing::info!(path = %path.display(), name = %config.name, "config loaded");
        Ok(config)
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check the parts of the filter that do not depend on the dataset.
    ///
    /// Region aliases are resolved here so an unknown name fails at load
    /// time rather than on first use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.filters.region_alias()?;
        if let Some((min, max)) = self.filters.years {
            crate::filter::YearRange::new(min, max)?;
        }
        Ok(())
    }

    /// Dataset path resolved against the directory holding the config.
    #[must_use]
    pub fn data_path(&self, config_dir: &Path) -> PathBuf {
        if self.data.source.is_absolute() {
            self.data.source.clone()
        } else {
            config_dir.join(&self.data.source)
        }
    }
}
