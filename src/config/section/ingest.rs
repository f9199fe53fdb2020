//! `[ingest]` section configuration.
//!
//! Defaults for uploaded photo processing. Every field can be overridden
//! per call from the command line.
//!
//! # Example
//!
//! ```toml
//! [ingest]
//! compress = true       # Resize and re-encode (false keeps the original bytes)
//! max_width = 800       # Output bounds in pixels
//! max_height = 800
//! quality = 0.8         # Lossy encoder quality, 0.0 to 1.0
//! max_size_mb = 5.0     # Largest accepted upload
//! advisory_kb = 500.0   # Warn when the stored image is larger than this
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::ingest::IngestOptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub compress: bool,
    pub max_width: u32,
    pub max_height: u32,
    pub quality: f32,
    pub max_size_mb: f64,
    pub advisory_kb: f64,
}

impl IngestConfig {
    pub const FIELD_MAX_WIDTH: FieldPath = FieldPath::new("ingest.max_width");
    pub const FIELD_MAX_HEIGHT: FieldPath = FieldPath::new("ingest.max_height");
    pub const FIELD_QUALITY: FieldPath = FieldPath::new("ingest.quality");
    pub const FIELD_MAX_SIZE_MB: FieldPath = FieldPath::new("ingest.max_size_mb");
    pub const FIELD_ADVISORY_KB: FieldPath = FieldPath::new("ingest.advisory_kb");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.max_width == 0 {
            diag.error(Self::FIELD_MAX_WIDTH, "must be greater than 0");
        }
        if self.max_height == 0 {
            diag.error(Self::FIELD_MAX_HEIGHT, "must be greater than 0");
        }
        if !(0.0..=1.0).contains(&self.quality) {
            diag.error_with_hint(
                Self::FIELD_QUALITY,
                format!("{} is out of range", self.quality),
                "use a value between 0.0 and 1.0, e.g. 0.8",
            );
        }
        if self.max_size_mb.is_nan() || self.max_size_mb <= 0.0 {
            diag.error(Self::FIELD_MAX_SIZE_MB, "must be greater than 0");
        }
        if self.advisory_kb.is_nan() || self.advisory_kb < 0.0 {
            diag.error(Self::FIELD_ADVISORY_KB, "must not be negative");
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        let options = IngestOptions::default();
        Self {
            compress: options.compress,
            max_width: options.max_width,
            max_height: options.max_height,
            quality: options.quality,
            max_size_mb: options.max_size_mb,
            advisory_kb: options.advisory_kb,
        }
    }
}

impl From<&IngestConfig> for IngestOptions {
    fn from(config: &IngestConfig) -> Self {
        Self {
            compress: config.compress,
            max_width: config.max_width,
            max_height: config.max_height,
            quality: config.quality,
            max_size_mb: config.max_size_mb,
            advisory_kb: config.advisory_kb,
        }
    }
}
