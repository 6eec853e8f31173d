//! Library manifests.
//!
//! A manifest is the JSON description of one library version: its name,
//! version and node types. [`crate::SyntaxLibrary::from_manifest`] turns it
//! into the live type table.
//!
//! ```json
//! {
//!   "name": "csyntax",
//!   "version": "2.0",
//!   "types": [
//!     { "name": "CSharp.Syntax.CSharpSyntaxNode", "abstract": true },
//!     {
//!       "name": "CSharp.Syntax.SingleVariableDesignationSyntax",
//!       "base": "CSharp.Syntax.VariableDesignationSyntax",
//!       "properties": [{ "name": "Identifier", "type": { "kind": "token" } }]
//!     }
//!   ]
//! }
//! ```

use crate::error::{Result, SyntaxError};
use crate::library::LibraryVersion;
use crate::metadata::ValueType;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryManifest {
    pub name: String,
    pub version: LibraryVersion,
    #[serde(default)]
    pub types: Vec<TypeManifest>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeManifest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub properties: Vec<PropertyManifest>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyManifest {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    /// Whether a `with` update exists; defaults to `true`.
    #[serde(default = "default_true", rename = "with")]
    pub has_with: bool,
}

fn default_true() -> bool {
    true
}

impl LibraryManifest {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| SyntaxError::manifest(&e))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SyntaxError::manifest(&e))
    }
}

impl TypeManifest {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            base: None,
            is_abstract: false,
            properties: Vec::new(),
        }
    }

    pub fn with_base(mut self, base: &str) -> Self {
        self.base = Some(base.to_string());
        self
    }

    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn property(mut self, name: &str, value_type: ValueType) -> Self {
        self.properties.push(PropertyManifest {
            name: name.to_string(),
            value_type,
            has_with: true,
        });
        self
    }

    /// A property the library can read but offers no `with` update for.
    pub fn read_only_property(mut self, name: &str, value_type: ValueType) -> Self {
        self.properties.push(PropertyManifest {
            name: name.to_string(),
            value_type,
            has_with: false,
        });
        self
    }
}
