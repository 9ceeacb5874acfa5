//! # jobscreen Common Library
//!
//! Shared code for the jobscreen service:
//! - Error type used outside the HTTP layer
//! - Configuration resolution (CLI → ENV → TOML → compiled defaults)
//! - Signed flash messages carried between form submission and redirect

pub mod config;
pub mod error;
pub mod flash;

pub use config::Config;
pub use error::{Error, Result};
