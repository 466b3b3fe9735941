//! Processing configuration.
//!
//! [`ProcessingConfig`] is a plain value. Every field has an explicit default
//! taken from [`crate::constants`]; callers change individual options through
//! [`ProcessingConfig::with_overrides`] or a YAML file, both of which reject
//! unknown option names and wrongly-shaped values.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::checker::CheckerSettings;
use crate::constants::*;
use crate::error::ConfigError;

/// Output serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ext())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    // Column mappings
    pub email_column: String,
    pub full_name_column: String,
    pub linked_in_url_column: String,
    pub reg_body_column: String,
    pub reg_number_column: String,
    pub state_column: String,

    /// Field names for headerless input. `None` means the input has its own
    /// header row.
    pub column_names: Option<Vec<String>>,

    // Processing options
    pub check_registrations: bool,
    pub output_format: OutputFormat,
    pub selenium_headless: bool,
    /// Seconds a checker waits for page elements.
    pub selenium_implicit_wait: u64,

    // File paths
    pub driver_cache_dir: PathBuf,
    pub output_file: Option<PathBuf>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            email_column: DEFAULT_EMAIL_COLUMN.to_string(),
            full_name_column: DEFAULT_FULL_NAME_COLUMN.to_string(),
            linked_in_url_column: DEFAULT_LINKED_IN_URL_COLUMN.to_string(),
            reg_body_column: DEFAULT_REG_BODY_COLUMN.to_string(),
            reg_number_column: DEFAULT_REG_NUMBER_COLUMN.to_string(),
            state_column: DEFAULT_STATE_COLUMN.to_string(),
            column_names: Some(DEFAULT_COLUMN_NAMES.iter().map(|s| s.to_string()).collect()),
            check_registrations: DEFAULT_CHECK_REGISTRATIONS,
            output_format: OutputFormat::Json,
            selenium_headless: DEFAULT_SELENIUM_HEADLESS,
            selenium_implicit_wait: DEFAULT_SELENIUM_IMPLICIT_WAIT_SECS,
            driver_cache_dir: PathBuf::from(DEFAULT_DRIVER_CACHE_DIR),
            output_file: None,
        }
    }
}

impl ProcessingConfig {
    /// Build a config from the defaults with the given options replaced.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidArgument`] for an unrecognized option
    /// name or a value of the wrong type.
    ///
    /// # Example
    /// ```ignore
    /// use serde_json::json;
    /// use reggie::ProcessingConfig;
    ///
    /// let overrides = json!({"selenium_headless": false, "output_format": "csv"});
    /// let config = ProcessingConfig::with_overrides(overrides.as_object().unwrap())?;
    /// ```
    pub fn with_overrides(overrides: &Map<String, Value>) -> Result<Self, ConfigError> {
        Self::default().merged(overrides)
    }

    /// Return a copy of `self` with the given options replaced.
    pub fn merged(&self, overrides: &Map<String, Value>) -> Result<Self, ConfigError> {
        let mut base = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(ConfigError::InvalidArgument(format!(
                    "config serialized to non-object value {}",
                    other
                )))
            }
            Err(e) => return Err(ConfigError::InvalidArgument(e.to_string())),
        };

        for (key, value) in overrides {
            base.insert(key.clone(), value.clone());
        }

        serde_json::from_value(Value::Object(base))
            .map_err(|e| ConfigError::InvalidArgument(e.to_string()))
    }

    /// Parse a YAML mapping of options. Absent options keep their defaults.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let overrides: Map<String, Value> = serde_yaml::from_str(contents)?;
        Self::with_overrides(&overrides)
    }

    /// Load configuration from a YAML file.
    ///
    /// # Example
    /// ```ignore
    /// use reggie::ProcessingConfig;
    ///
    /// let config = ProcessingConfig::load_from_file("reggie.yaml")?;
    /// println!("{}", serde_json::to_string_pretty(&config.to_dict())?);
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Grouped view of the configuration for display.
    pub fn to_dict(&self) -> Value {
        json!({
            "columns": {
                "email": self.email_column,
                "full_name": self.full_name_column,
                "linked_in_url": self.linked_in_url_column,
                "reg_body": self.reg_body_column,
                "reg_number": self.reg_number_column,
                "state": self.state_column,
            },
            "csv_handling": {
                "column_names": self.column_names,
            },
            "processing": {
                "check_registrations": self.check_registrations,
                "output_format": self.output_format,
                "selenium_headless": self.selenium_headless,
                "selenium_implicit_wait": self.selenium_implicit_wait,
            },
            "paths": {
                "driver_cache_dir": self.driver_cache_dir,
                "output_file": self.output_file,
            },
        })
    }

    /// Settings handed to registry checkers.
    pub fn checker_settings(&self) -> CheckerSettings {
        CheckerSettings {
            headless: self.selenium_headless,
            implicit_wait: Duration::from_secs(self.selenium_implicit_wait),
            driver_cache_dir: self.driver_cache_dir.clone(),
        }
    }
}
