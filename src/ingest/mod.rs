//! Profile photo ingest.
//!
//! Turns an uploaded file into a base64 data URI that can be stored next
//! to a profile.
//!
//! # Modules
//!
//! - [`options`]: knobs and the size gate
//! - [`source`]: the uploaded file handle
//! - [`resize`]: decode, box-fit and re-encode (blocking)
//! - [`error`]: typed failures with user-facing messages
//!
//! # Pipeline
//!
//! ```text
//! UploadedImage
//!       │
//!       ▼
//!  ┌──────────┐
//!  │ validate │ ──► presence, options, `image/*` type, size limit (no content read)
//!  └────┬─────┘
//!       │ await read
//!       ▼
//!  ┌───────────┐
//!  │ rasterize │ ──► decode + fit + encode on the blocking pool
//!  └────┬──────┘     (skipped when `compress = false`)
//!       │
//!       ▼
//!  data:<mime>;base64,... ──► size advisory (warning only)
//! ```

mod error;
mod options;
mod resize;
mod source;

pub use error::IngestError;
pub use options::{IngestOptions, SizeCheck, validate_image_size};
pub use resize::{Encoded, fit_within, rasterize, target_format};
pub use source::UploadedImage;

use crate::utils::{data_uri, mime};
use crate::{debug, log};

/// Process an upload into a data URI.
///
/// Validation failures are reported before any content is read. With
/// `compress` off the original bytes and MIME type are kept exactly.
pub async fn process(
    file: Option<&UploadedImage>,
    options: &IngestOptions,
) -> Result<String, IngestError> {
    let file = file.ok_or(IngestError::NoFile)?;
    options.validate()?;

    if !mime::is_image(file.mime()) {
        return Err(IngestError::InvalidType {
            mime: file.mime().to_string(),
        });
    }

    let check = validate_image_size(file.size(), options.max_size_mb);
    if !check.valid {
        return Err(IngestError::FileTooLarge {
            size_mb: check.size_mb,
            limit_mb: options.max_size_mb,
        });
    }
    debug!("ingest"; "{}: {}", file.name(), check.message);

    let bytes = file.read().await.map_err(|error| IngestError::Io {
        name: file.name().to_string(),
        error,
    })?;

    let uri = if options.compress {
        let declared = file.mime().to_string();
        let opts = *options;
        let encoded = tokio::task::spawn_blocking(move || rasterize(&bytes, &declared, &opts))
            .await
            .map_err(|error| IngestError::Task {
                name: file.name().to_string(),
                error,
            })?
            .map_err(|error| IngestError::Decode {
                name: file.name().to_string(),
                error,
            })?;
        data_uri::encode(encoded.mime, &encoded.bytes)
    } else {
        data_uri::encode(file.mime(), &bytes)
    };

    advise_size(file.name(), &uri, options.advisory_kb);
    Ok(uri)
}

/// Approximate decoded size of a data URI in kilobytes.
pub fn approx_decoded_kb(uri: &str) -> f64 {
    data_uri::approx_decoded_bytes(uri) / 1024.0
}

/// Warn when the stored form of an image is larger than recommended.
///
/// Returns whether the warning fired.
pub fn advise_size(name: &str, uri: &str, advisory_kb: f64) -> bool {
    let size_kb = approx_decoded_kb(uri);
    if size_kb <= advisory_kb {
        return false;
    }
    log!(
        "warning";
        "{} is {}KB after processing, exceeds recommended {}KB. consider further compression",
        name, size_kb.round(), advisory_kb
    );
    true
}
