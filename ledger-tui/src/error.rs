use std::io;
use std::path::PathBuf;

use combobox::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    #[error("could not read catalog {}: {source}", path.display())]
    CatalogRead { path: PathBuf, source: io::Error },

    #[error("invalid catalog {}: {source}", path.display())]
    CatalogParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid setting: {0}")]
    Config(String),

    #[error(transparent)]
    Field(#[from] ConfigError),

    #[error("could not start logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}
