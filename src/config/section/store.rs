//! `[store]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [store]
//! path = "~/.profilekit/store.json"   # Tilde is expanded; relative paths
//!                                     # resolve against the config directory
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

pub const DEFAULT_STORE_PATH: &str = "~/.profilekit/store.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Location of the local store JSON document.
    pub path: PathBuf,
}

impl StoreConfig {
    pub const FIELD_PATH: FieldPath = FieldPath::new("store.path");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.path.as_os_str().is_empty() {
            diag.error(Self::FIELD_PATH, "must not be empty");
        } else if self.path.to_str().is_none() {
            diag.error(Self::FIELD_PATH, "must be valid UTF-8");
        }
    }

    /// Absolute store location: tilde expanded, relative paths joined to
    /// `root`.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(self.path.to_str().unwrap_or_default()).into_owned();
        let path = PathBuf::from(expanded);
        if path.is_relative() {
            root.join(path)
        } else {
            path
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}
