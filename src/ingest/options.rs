//! Ingest options and the pre-read size gate.

use super::IngestError;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Knobs for one [`process`](super::process) call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngestOptions {
    /// Resize and re-encode (true) or pass the bytes through untouched.
    pub compress: bool,
    /// Upper bound for the output width in pixels.
    pub max_width: u32,
    /// Upper bound for the output height in pixels.
    pub max_height: u32,
    /// Encoder quality in `[0, 1]`, used by lossy codecs only.
    pub quality: f32,
    /// Largest accepted input in megabytes.
    pub max_size_mb: f64,
    /// Output size in kilobytes above which a warning is logged.
    pub advisory_kb: f64,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            compress: true,
            max_width: 800,
            max_height: 800,
            quality: 0.8,
            max_size_mb: 5.0,
            advisory_kb: 500.0,
        }
    }
}

impl IngestOptions {
    /// Options that keep the original bytes.
    pub fn uncompressed() -> Self {
        Self {
            compress: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), IngestError> {
        if !(0.0..=1.0).contains(&self.quality) {
            return Err(IngestError::InvalidOptions(format!(
                "quality must be between 0 and 1, got {}",
                self.quality
            )));
        }
        if self.max_width == 0 || self.max_height == 0 {
            return Err(IngestError::InvalidOptions(format!(
                "bounds must be positive, got {}x{}",
                self.max_width, self.max_height
            )));
        }
        if self.max_size_mb.is_nan() || self.max_size_mb <= 0.0 {
            return Err(IngestError::InvalidOptions(format!(
                "size limit must be positive, got {} MB",
                self.max_size_mb
            )));
        }
        Ok(())
    }

    /// Quality on the 1..=100 scale used by the JPEG encoder.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn encoder_quality(&self) -> u8 {
        (self.quality * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

/// Result of checking a file size against a limit.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeCheck {
    pub valid: bool,
    /// Size in MB rounded to 2 decimals.
    pub size_mb: f64,
    /// Display text for the check.
    pub message: String,
}

/// Check `size_bytes` against `max_size_mb`.
#[allow(clippy::cast_precision_loss)]
pub fn validate_image_size(size_bytes: u64, max_size_mb: f64) -> SizeCheck {
    let size_mb = round2(size_bytes as f64 / BYTES_PER_MB);
    let valid = size_bytes as f64 <= max_size_mb * BYTES_PER_MB;

    let message = if valid {
        format!("File size: {size_mb:.2} MB")
    } else {
        format!("File too large ({size_mb:.2} MB). Maximum allowed: {max_size_mb} MB")
    };

    SizeCheck {
        valid,
        size_mb,
        message,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
