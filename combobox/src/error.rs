use thiserror::Error;

/// Rejected combobox configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("combobox field name must not be empty")]
    EmptyName,

    #[error("combobox '{field}' has more than one option with value '{value}'")]
    DuplicateValue { field: String, value: String },

    #[error("combobox '{field}' needs a menu height of at least 1 row")]
    ZeroMenuHeight { field: String },
}
