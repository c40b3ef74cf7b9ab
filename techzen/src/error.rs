//! Error handling for the techzen CLI.
//!
//! Structured `thiserror` enum aggregating config/IO failures with the
//! lex/parse/runtime errors surfaced by the pipeline crates.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TechZenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Source(String),

    #[error("{0}")]
    Runtime(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TechZenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = TechZenError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TechZenError = io_err.into();
        assert!(matches!(err, TechZenError::Io(_)));
    }
}
