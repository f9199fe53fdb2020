//! Local store persisted as one JSON document.
//!
//! ```text
//! {
//!   "images": { "profilePictures": {..}, "projectImages": {..} },
//!   "users":  { "currentUser": .., "profiles": {..}, "fullNameMap": {..} }
//! }
//! ```
//!
//! The store is a plain value: load it, mutate it through [`ImageStore`]
//! and [`UserDirectory`], then [`persist`](LocalStore::persist) it.

mod error;
mod images;
mod users;

pub use error::StoreError;
pub use images::{ImageStore, ProjectImage, content_id};
pub use users::UserDirectory;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalStore {
    pub images: ImageStore,
    pub users: UserDirectory,
}

impl LocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store at `path`. A missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!("store"; "no store at {}, starting empty", path.display());
            return Ok(Self::new());
        }

        let json = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        let store: Self = serde_json::from_str(&json).map_err(|e| StoreError::json(path, e))?;

        debug!(
            "store";
            "loaded {} profiles, {} pictures",
            store.users.profiles().count(),
            store.images.profile_pictures().count()
        );
        Ok(store)
    }

    /// Write the store to `path` through a temp file and rename.
    ///
    /// Returns `false` when the file already held the same content and
    /// nothing was written.
    pub fn persist(&self, path: &Path) -> Result<bool, StoreError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| StoreError::json(path, e))?;

        if file_content_matches(path, &json) {
            debug!("store"; "unchanged, skipping write");
            return Ok(false);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &json).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))?;

        debug!("store"; "saved {}", path.display());
        Ok(true)
    }

    /// Remove everything stored for a user: images and profile.
    pub fn forget_user(&mut self, full_name: &str) -> bool {
        let images = self.images.clear_user(full_name);
        let profile = self.users.delete_profile(full_name).is_some();
        images || profile
    }
}

/// Check if file content is the same as new content
fn file_content_matches(path: &Path, content: &str) -> bool {
    path.exists() && fs::read_to_string(path).is_ok_and(|existing| existing == content)
}
