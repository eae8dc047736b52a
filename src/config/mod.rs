//! Project configuration loading and defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FixtureError, Result};
use crate::render::Preamble;

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".fixturegen.json";

/// Project configuration, read from `.fixturegen.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory (or single file) scanned for Swift sources
    #[serde(default = "default_source")]
    pub source: PathBuf,

    /// Generated document path
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// File patterns to include (glob syntax)
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// File patterns to exclude (glob syntax)
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Modules imported by the generated document
    #[serde(default)]
    pub additional_imports: Vec<String>,

    /// Module imported with `@testable`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testable_import: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: default_source(),
            output: default_output(),
            include: default_include(),
            exclude: default_exclude(),
            additional_imports: Vec::new(),
            testable_import: None,
        }
    }
}

impl Config {
    /// Load config from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| FixtureError::io(path, e))?;
        serde_json::from_str(&content).map_err(|source| FixtureError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path`, falling back to defaults when it does not exist.
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Import section of the generated document.
    pub fn preamble(&self) -> Preamble {
        Preamble::new(self.additional_imports.clone(), self.testable_import.clone())
    }
}

fn default_source() -> PathBuf {
    PathBuf::from("./")
}

fn default_output() -> PathBuf {
    PathBuf::from("./Generated/Fixtures.swift")
}

fn default_include() -> Vec<String> {
    vec!["**/*.swift".to_string()]
}

fn default_exclude() -> Vec<String> {
    vec![
        // SwiftPM
        "**/.build/**".to_string(),
        "**/.swiftpm/**".to_string(),
        // CocoaPods / Carthage
        "**/Pods/**".to_string(),
        "**/Carthage/**".to_string(),
        // Xcode
        "**/DerivedData/**".to_string(),
        "**/.git/**".to_string(),
    ]
}
