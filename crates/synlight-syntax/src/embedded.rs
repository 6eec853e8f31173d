//! Bundled library versions.
//!
//! The manifests of every library version the shim is tested against are
//! embedded with `include_str!`, so a process can load any of them without
//! touching the file system.
//!
//! | version | adds |
//! |---|---|
//! | 1.0 | statements, expressions, parameter lists |
//! | 2.0 | variable designations, local function statements |
//! | 3.0 | `AttributeLists` on every statement |

use crate::error::{Result, SyntaxError};
use crate::library::{LibraryVersion, SyntaxLibrary};

/// An embedded library manifest.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedManifest {
    pub version: LibraryVersion,
    pub file_name: &'static str,
    pub content: &'static str,
}

pub const MANIFEST_1_0: EmbeddedManifest = EmbeddedManifest {
    version: LibraryVersion::new(1, 0),
    file_name: "csyntax-1.0.json",
    content: include_str!("../manifests/csyntax-1.0.json"),
};

pub const MANIFEST_2_0: EmbeddedManifest = EmbeddedManifest {
    version: LibraryVersion::new(2, 0),
    file_name: "csyntax-2.0.json",
    content: include_str!("../manifests/csyntax-2.0.json"),
};

pub const MANIFEST_3_0: EmbeddedManifest = EmbeddedManifest {
    version: LibraryVersion::new(3, 0),
    file_name: "csyntax-3.0.json",
    content: include_str!("../manifests/csyntax-3.0.json"),
};

/// All bundled manifests, oldest first.
pub const ALL_MANIFESTS: &[EmbeddedManifest] = &[MANIFEST_1_0, MANIFEST_2_0, MANIFEST_3_0];

/// Bundled manifest for `version`, if one exists.
pub fn get_manifest(version: LibraryVersion) -> Option<&'static EmbeddedManifest> {
    ALL_MANIFESTS.iter().find(|m| m.version == version)
}

/// Version loaded when nothing else is configured.
pub fn latest_version() -> LibraryVersion {
    MANIFEST_3_0.version
}

impl SyntaxLibrary {
    /// Load a bundled library version.
    pub fn bundled(version: LibraryVersion) -> Result<Self> {
        let manifest =
            get_manifest(version).ok_or_else(|| SyntaxError::UnknownVersion(version.to_string()))?;
        Self::from_json(manifest.content)
    }

    pub fn latest() -> Result<Self> {
        Self::bundled(latest_version())
    }
}
