//! Process-level errors for the Faceflow client
//!
//! Backend request failures are not represented here; they stay inside the
//! client crate as `FetchError` and are turned into inline messages.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures outside the HTTP boundary: startup configuration and local lookups
#[derive(Error, Debug)]
pub enum Error {
    /// Reading the TOML config file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file, environment value, or resolved setting is unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Album id is not in the loaded album list
    #[error("Not found: {0}")]
    NotFound(String),
}
