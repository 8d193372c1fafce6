use crate::core::fill::OrderPolicy;
use crate::core::schema::ColumnNames;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_datetime_column")]
    pub datetime_column: String,
    #[serde(default = "default_name_column")]
    pub name_column: String,
    #[serde(default = "default_holiday_column")]
    pub holiday_column: String,
    /// Columns that repeat the synthetic timestamp instead of `-1`.
    #[serde(default)]
    pub echo_columns: Vec<String>,
    #[serde(default)]
    pub strict_order: bool,
}

fn default_datetime_column() -> String {
    "dateTime".to_string()
}
fn default_name_column() -> String {
    "name".to_string()
}
fn default_holiday_column() -> String {
    "holiday".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            datetime_column: default_datetime_column(),
            name_column: default_name_column(),
            holiday_column: default_holiday_column(),
            echo_columns: Vec::new(),
            strict_order: false,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rhourfill")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rhourfill")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rhourfill.conf")
    }

    /// Load configuration from `path`, or defaults if the file does not exist
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> AppResult<Self> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Write this configuration to `path`, creating the parent directory
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)
    }

    /// Names lookup per lo Schema Resolver
    pub fn column_names(&self) -> ColumnNames {
        ColumnNames {
            datetime: self.datetime_column.clone(),
            name: self.name_column.clone(),
            holiday: self.holiday_column.clone(),
        }
    }

    pub fn order_policy(&self) -> OrderPolicy {
        OrderPolicy::from_strict(self.strict_order)
    }

    /// Problems that would make every fill fail or behave oddly.
    pub fn check(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for (label, value) in [
            ("datetime_column", &self.datetime_column),
            ("name_column", &self.name_column),
            ("holiday_column", &self.holiday_column),
        ] {
            if value.trim().is_empty() {
                issues.push(format!("'{label}' must not be empty"));
            }
        }

        if self.datetime_column == self.name_column {
            issues.push("'datetime_column' and 'name_column' must differ".to_string());
        }

        for col in &self.echo_columns {
            if col == &self.datetime_column || col == &self.name_column {
                issues.push(format!("echo column '{col}' is a key column and is ignored"));
            }
        }

        issues
    }
}
