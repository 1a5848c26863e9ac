//! Process-wide settings resolved at startup.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use log::LevelFilter;

use crate::error::AppError;
use crate::paths;

/// Log level override, e.g. `LEDGER_LOG=trace`.
pub const LOG_ENV: &str = "LEDGER_LOG";

/// Catalog file override.
pub const CATALOG_ENV: &str = "LEDGER_CATALOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_level: LevelFilter,
    /// Where the option catalog is read from; `None` means built-in data only.
    pub catalog_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Debug,
            catalog_path: paths::catalog_file(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        let mut settings = Self::default();
        if let Ok(level) = env::var(LOG_ENV) {
            settings.log_level = parse_level(&level)?;
        }
        if let Some(path) = env::var_os(CATALOG_ENV) {
            settings.catalog_path = Some(PathBuf::from(path));
        }
        Ok(settings)
    }
}

fn parse_level(raw: &str) -> Result<LevelFilter, AppError> {
    LevelFilter::from_str(raw.trim())
        .map_err(|_| AppError::Config(format!("{LOG_ENV}={raw:?} is not a log level")))
}
