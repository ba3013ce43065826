use crate::errors::{AppError, AppResult};
use crate::utils::path::resolve_in;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub mod check;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite file holding the `rawdata` table.
    pub database: String,
    /// First day counted by `attendance`.
    #[serde(default = "default_reporting_start")]
    pub reporting_start: NaiveDate,
    #[serde(default = "default_trailing_window_days")]
    pub trailing_window_days: u32,
    /// Equipment kinds flagged by `present` (`"<Kind> allowed"` events).
    #[serde(default = "default_equipment")]
    pub equipment: Vec<String>,
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    #[serde(default = "default_device_log_limit")]
    pub device_log_limit: usize,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_reporting_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 10, 1).unwrap_or_default()
}
fn default_trailing_window_days() -> u32 {
    90
}
fn default_equipment() -> Vec<String> {
    vec!["Woodshop".to_string()]
}
fn default_recent_limit() -> usize {
    100
}
fn default_device_log_limit() -> usize {
    1000
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            reporting_start: default_reporting_start(),
            trailing_window_days: default_trailing_window_days(),
            equipment: default_equipment(),
            recent_limit: default_recent_limit(),
            device_log_limit: default_device_log_limit(),
            separator_char: default_separator_char(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rcheckin")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rcheckin")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rcheckin.conf")
    }

    /// Return the default path of the SQLite event log
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rcheckin.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let cfg: Self =
            serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    fn validate(&self) -> AppResult<()> {
        if self.database.trim().is_empty() {
            return Err(AppError::Config("`database` must not be empty".into()));
        }
        if self.separator_char.chars().count() != 1 {
            return Err(AppError::Config(format!(
                "`separator_char` must be a single character, got {:?}",
                self.separator_char
            )));
        }
        if self.equipment.iter().any(|k| k.trim().is_empty()) {
            return Err(AppError::Config("`equipment` entries must not be empty".into()));
        }
        Ok(())
    }

    /// Database path with `~` expanded.
    pub fn database_path(&self) -> PathBuf {
        resolve_in(&Self::config_dir(), &self.database)
    }

    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }

    /// Initialize configuration and database location.
    ///
    /// Returns the database path. In test mode the config file is left alone.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => resolve_in(&dir, &name),
            None => dir.join("rcheckin.sqlite"),
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = Self::with_database(db_path.clone()).to_yaml()?;
            fs::write(Self::config_file(), yaml).map_err(|_| AppError::ConfigSave)?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}
