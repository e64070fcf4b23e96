//! # Settings Module
//!
//! ## Purpose
//! Holds the user configuration of the balancer: log verbosity, an optional custom
//! atomic weight table and the look of the composition table printed by the CLI.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "log_level": "info",
//!   "atomic_weights_file": "my_weights.json",
//!   "table_format": "Box"
//! }
//! ```
//! Every field is optional; missing fields take their defaults.
//!
//! ## Usage
//! ```rust, ignore
//! let settings = BalancerSettings::load()?;
//! let table = settings.atomic_weight_table()?;
//! ```
use crate::Chemistry::atomic_weights::AtomicWeightTable;
use crate::Chemistry::chem_errors::ConfigError;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "balancer_config.json";

/// style of the composition table printed by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TableFormat {
    #[default]
    Box,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalancerSettings {
    /// one of off, error, warn, info, debug, trace
    pub log_level: String,
    /// JSON atomic weight table used instead of the built-in one
    pub atomic_weights_file: Option<String>,
    pub table_format: TableFormat,
}

impl Default for BalancerSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            atomic_weights_file: None,
            table_format: TableFormat::Box,
        }
    }
}

impl BalancerSettings {
    /// Reads `balancer_config.json` from the working directory, defaults if absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Reads settings from `path`; a missing file gives the defaults, a malformed one
    /// is an error.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if !path.as_ref().exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// `None` when `log_level` names no level
    pub fn parsed_log_level(&self) -> Option<LevelFilter> {
        self.log_level.parse::<LevelFilter>().ok()
    }

    /// the configured level, `Info` when it names no level; logs nothing
    pub fn level_filter(&self) -> LevelFilter {
        self.parsed_log_level().unwrap_or(LevelFilter::Info)
    }

    /// the configured custom table, or the built-in one
    pub fn atomic_weight_table(&self) -> Result<Cow<'static, AtomicWeightTable>, ConfigError> {
        match &self.atomic_weights_file {
            Some(path) => Ok(Cow::Owned(AtomicWeightTable::from_json_file(path)?)),
            None => Ok(Cow::Borrowed(AtomicWeightTable::standard())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = BalancerSettings::load_from(dir.path().join("absent.json")).unwrap();
        assert_eq!(settings, BalancerSettings::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        let settings = BalancerSettings {
            log_level: "debug".to_string(),
            atomic_weights_file: Some("weights.json".to_string()),
            table_format: TableFormat::Plain,
        };
        settings.save_to(&path).unwrap();
        assert_eq!(BalancerSettings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_and_malformed_files() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "table_format": "Plain" }}"#).unwrap();
        let settings = BalancerSettings::load_from(file.path()).unwrap();
        assert_eq!(settings.table_format, TableFormat::Plain);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.atomic_weights_file, None);

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ log_level: ").unwrap();
        assert!(matches!(
            BalancerSettings::load_from(file.path()),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_level_filter() {
        let mut settings = BalancerSettings::default();
        assert_eq!(settings.level_filter(), LevelFilter::Info);
        settings.log_level = "TRACE".to_string();
        assert_eq!(settings.level_filter(), LevelFilter::Trace);
        settings.log_level = "off".to_string();
        assert_eq!(settings.level_filter(), LevelFilter::Off);
        assert_eq!(settings.parsed_log_level(), Some(LevelFilter::Off));
        settings.log_level = "loud".to_string();
        assert_eq!(settings.parsed_log_level(), None);
        assert_eq!(settings.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_custom_atomic_weight_table() {
        let settings = BalancerSettings::default();
        assert!(matches!(
            settings.atomic_weight_table().unwrap(),
            Cow::Borrowed(_)
        ));

        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "H": {{ "atomic_number": 1, "name": "protium", "atomic_mass": 1.0 }} }}"#
        )
        .unwrap();
        let settings = BalancerSettings {
            atomic_weights_file: Some(file.path().to_string_lossy().into_owned()),
            ..BalancerSettings::default()
        };
        let table = settings.atomic_weight_table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("H").unwrap().name, "protium");

        let settings = BalancerSettings {
            atomic_weights_file: Some("no_such_weights.json".to_string()),
            ..BalancerSettings::default()
        };
        assert!(matches!(
            settings.atomic_weight_table(),
            Err(ConfigError::Io(_))
        ));
    }
}
