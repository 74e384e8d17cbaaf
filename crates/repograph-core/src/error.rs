use thiserror::Error;

/// Error type for string-to-enum conversion failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid file category: {0}")]
    InvalidCategory(String),
    #[error("Invalid view mode: {0}")]
    InvalidViewMode(String),
    #[error("Invalid theme: {0}")]
    InvalidTheme(String),
    #[error("Invalid usage resolver: {0}")]
    InvalidUsageResolver(String),
}
