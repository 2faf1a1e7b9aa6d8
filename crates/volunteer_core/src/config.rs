//! Runtime configuration.
//!
//! # Responsibility
//! - Resolve database path, scheduler timezone and logging options.
//! - Layer sources: defaults, then an optional TOML file, then environment.
//!
//! # Invariants
//! - The scheduler zone is carried as an explicit [`SchedulerConfig`] value,
//!   never as process-wide state.
//! - A configuration returned by [`AppConfig::load`] has a resolvable zone.

use crate::logging::default_log_level;
use crate::schedule::today_in;
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Zone used when nothing else is configured.
pub const DEFAULT_TIMEZONE: &str = "Australia/Sydney";
pub const DEFAULT_DATABASE_PATH: &str = "volunteer.db";
pub const DEFAULT_CONFIG_FILE: &str = "volunteer.toml";

pub const CONFIG_PATH_ENV: &str = "VOLUNTEER_CONFIG";
pub const DATABASE_ENV: &str = "VOLUNTEER_DATABASE";
pub const TIMEZONE_ENV: &str = "VOLUNTEER_TIMEZONE";
pub const LOG_LEVEL_ENV: &str = "VOLUNTEER_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "VOLUNTEER_LOG_DIR";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown timezone `{0}`")]
    UnknownTimezone(String),
    #[error("failed to read config file `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file `{}`: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Application-level settings shared by the CLI and library callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite database file.
    pub database_path: PathBuf,
    /// IANA zone name workshops are scheduled in.
    pub timezone: String,
    pub log_level: String,
    /// Absolute directory for rolling log files. Unset means no file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            timezone: DEFAULT_TIMEZONE.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from `.env`, the optional config file and the
    /// process environment.
    ///
    /// # Errors
    /// - Returns an error when an explicitly named or present config file
    ///   cannot be read or parsed.
    /// - Returns an error when the resolved timezone is unknown.
    pub fn load() -> ConfigResult<Self> {
        dotenvy::dotenv().ok();

        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.scheduler()?;
        Ok(config)
    }

    /// Reads a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overrides fields from environment-style `lookup`. Blank values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = value(DATABASE_ENV) {
            self.database_path = PathBuf::from(path);
        }
        if let Some(zone) = value(TIMEZONE_ENV) {
            self.timezone = zone.trim().to_string();
        }
        if let Some(level) = value(LOG_LEVEL_ENV) {
            self.log_level = level;
        }
        if let Some(dir) = value(LOG_DIR_ENV) {
            self.log_dir = Some(PathBuf::from(dir));
        }
    }

    /// Resolves the scheduler settings carried by this configuration.
    pub fn scheduler(&self) -> ConfigResult<SchedulerConfig> {
        parse_timezone(&self.timezone).map(SchedulerConfig::new)
    }
}

/// Settings passed explicitly into the workshop scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Zone in which event days and workshop times are interpreted.
    pub timezone: Tz,
}

impl SchedulerConfig {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// Current calendar date in the scheduler zone.
    pub fn today(&self) -> NaiveDate {
        today_in(self.timezone)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new(chrono_tz::Australia::Sydney)
    }
}

/// Parses an IANA zone name such as `Australia/Sydney`.
pub fn parse_timezone(name: &str) -> ConfigResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ConfigError::UnknownTimezone(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{
        parse_timezone, AppConfig, ConfigError, SchedulerConfig, DATABASE_ENV, LOG_DIR_ENV,
        TIMEZONE_ENV,
    };
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn defaults_schedule_in_sydney() {
        let config = AppConfig::default();
        assert_eq!(config.timezone, "Australia/Sydney");
        assert_eq!(config.scheduler().unwrap(), SchedulerConfig::default());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn toml_keeps_defaults_for_missing_keys() {
        let config: AppConfig = toml::from_str("timezone = \"Europe/Berlin\"").unwrap();
        assert_eq!(config.timezone, "Europe/Berlin");
        assert_eq!(config.database_path, PathBuf::from("volunteer.db"));
    }

    #[test]
    fn environment_overrides_file_values_and_ignores_blanks() {
        let mut config: AppConfig =
            toml::from_str("database_path = \"from-file.db\"\ntimezone = \"UTC\"").unwrap();
        let env = HashMap::from([
            (DATABASE_ENV, "from-env.db".to_string()),
            (TIMEZONE_ENV, "   ".to_string()),
            (LOG_DIR_ENV, "/var/log/volunteer".to_string()),
        ]);
        config.apply_env(|key| env.get(key).cloned());

        assert_eq!(config.database_path, PathBuf::from("from-env.db"));
        assert_eq!(config.timezone, "UTC");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/volunteer")));
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let err = parse_timezone("Mars/Olympus_Mons").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTimezone(name) if name == "Mars/Olympus_Mons"));
    }

    #[test]
    fn from_file_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("volunteer.toml");
        std::fs::write(&path, "timezone = [").unwrap();

        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("volunteer.toml"));
    }

    #[test]
    fn from_file_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
