//! MIME type detection utilities.
//!
//! Provides consistent MIME type detection for uploaded files and the
//! codecs the ingest pipeline can write.

use std::path::Path;

use image::ImageFormat;

/// Common MIME type constants.
pub mod types {
    // Text
    pub const PLAIN: &str = "text/plain";
    pub const JSON: &str = "application/json";

    // Documents
    pub const PDF: &str = "application/pdf";

    // Binary
    pub const OCTET_STREAM: &str = "application/octet-stream";

    // Images
    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
    pub const GIF: &str = "image/gif";
    pub const WEBP: &str = "image/webp";
    pub const AVIF: &str = "image/avif";
    pub const SVG: &str = "image/svg+xml";
    pub const ICO: &str = "image/x-icon";
    pub const BMP: &str = "image/bmp";
    pub const TIFF: &str = "image/tiff";
}

/// Guess MIME type from file extension.
pub fn from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    from_extension(ext.as_deref())
}

/// Guess MIME type from file extension string.
pub fn from_extension(ext: Option<&str>) -> &'static str {
    match ext {
        // Images
        Some("svg") => types::SVG,
        Some("png") => types::PNG,
        Some("jpg" | "jpeg" | "jfif") => types::JPEG,
        Some("gif") => types::GIF,
        Some("webp") => types::WEBP,
        Some("avif") => types::AVIF,
        Some("ico") => types::ICO,
        Some("bmp") => types::BMP,
        Some("tif" | "tiff") => types::TIFF,

        // Documents / Text
        Some("txt" | "md") => types::PLAIN,
        Some("json") => types::JSON,
        Some("pdf") => types::PDF,

        _ => types::OCTET_STREAM,
    }
}

/// Check if the MIME type represents an image.
pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// Raster format with an encoder for the given MIME type.
///
/// Parameters after `;` and letter case are ignored. Returns `None` for
/// image types that can be decoded but not written back (gif, bmp, svg...).
pub fn encodable_format(mime: &str) -> Option<ImageFormat> {
    let essence = mime.split(';').next().unwrap_or(mime).trim();
    match essence.to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(ImageFormat::Jpeg),
        "image/png" => Some(ImageFormat::Png),
        "image/webp" => Some(ImageFormat::WebP),
        _ => None,
    }
}

/// MIME type written into data URIs for an encoder format.
pub fn for_format(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => types::JPEG,
        ImageFormat::WebP => types::WEBP,
        ImageFormat::Gif => types::GIF,
        ImageFormat::Bmp => types::BMP,
        ImageFormat::Tiff => types::TIFF,
        ImageFormat::Ico => types::ICO,
        ImageFormat::Avif => types::AVIF,
        _ => types::PNG,
    }
}
