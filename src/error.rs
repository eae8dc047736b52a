//! Error types for the fixture generator.
//!
//! The generation core never fails; these errors cover the I/O and
//! configuration edges around it.

use std::path::PathBuf;

use thiserror::Error;

/// Library error type.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Filesystem failure with the path that caused it
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed
    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl FixtureError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Library result alias.
pub type Result<T> = std::result::Result<T, FixtureError>;
