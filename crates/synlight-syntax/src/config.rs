//! Choosing which library version a process loads.
//!
//! Two environment variables are consulted:
//!
//! - `SYNLIGHT_SYNTAX_MANIFEST`: path to a JSON manifest. Takes precedence.
//! - `SYNLIGHT_SYNTAX_VERSION`: a bundled version such as `2.0`.
//!
//! With neither set the latest bundled version is used.

use crate::embedded::latest_version;
use crate::error::Result;
use crate::library::{LibraryVersion, SyntaxLibrary};
use std::path::PathBuf;
use tracing::debug;

pub const MANIFEST_ENV: &str = "SYNLIGHT_SYNTAX_MANIFEST";
pub const VERSION_ENV: &str = "SYNLIGHT_SYNTAX_VERSION";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LibraryConfig {
    pub manifest_path: Option<PathBuf>,
    pub version: Option<LibraryVersion>,
}

impl LibraryConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let version = read(VERSION_ENV).map(|v| v.parse()).transpose()?;
        Ok(Self {
            manifest_path: read(MANIFEST_ENV).map(PathBuf::from),
            version,
        })
    }

    pub fn with_version(mut self, version: LibraryVersion) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = Some(path.into());
        self
    }

    /// Load the configured library.
    pub fn load(&self) -> Result<SyntaxLibrary> {
        if let Some(path) = &self.manifest_path {
            debug!(path = %path.display(), "loading syntax library manifest");
            let text = std::fs::read_to_string(path)?;
            return SyntaxLibrary::from_json(&text);
        }
        SyntaxLibrary::bundled(self.version.unwrap_or_else(latest_version))
    }
}
