//! `[avatar]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [avatar]
//! size = 200        # Side length for `profilekit avatar`
//! seed_size = 400   # Side length for avatars generated by `profilekit seed`
//! ```

use serde::{Deserialize, Serialize};

use crate::avatar::DEFAULT_AVATAR_SIZE;
use crate::config::{ConfigDiagnostics, FieldPath};

/// Side length of seeded avatars unless configured otherwise.
pub const DEFAULT_SEED_SIZE: u32 = 400;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    /// Side length in pixels for single avatars.
    pub size: u32,

    /// Side length in pixels for bulk seeding.
    pub seed_size: u32,
}

impl AvatarConfig {
    pub const FIELD_SIZE: FieldPath = FieldPath::new("avatar.size");
    pub const FIELD_SEED_SIZE: FieldPath = FieldPath::new("avatar.seed_size");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.size == 0 {
            diag.error(Self::FIELD_SIZE, "must be greater than 0");
        }
        if self.seed_size == 0 {
            diag.error(Self::FIELD_SEED_SIZE, "must be greater than 0");
        }
    }
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_AVATAR_SIZE,
            seed_size: DEFAULT_SEED_SIZE,
        }
    }
}
