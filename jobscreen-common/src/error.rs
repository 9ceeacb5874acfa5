//! Common error types for jobscreen

use thiserror::Error;

/// Common result type for jobscreen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across jobscreen crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML config file could not be parsed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
