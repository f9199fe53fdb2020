//! Decode, box-fit resize and re-encode.
//!
//! This is the blocking half of the pipeline and runs on the tokio
//! blocking pool. All pixel buffers are owned locals, so they are released
//! on every return path.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageResult};

use super::IngestOptions;
use crate::debug;
use crate::utils::mime;

/// Output of [`rasterize`].
#[derive(Debug, Clone)]
pub struct Encoded {
    /// MIME type of the codec that produced `bytes`.
    pub mime: &'static str,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Largest size with the same aspect ratio that fits inside the bounds.
///
/// Only ever scales down. Dimensions are rounded half up and never drop
/// below one pixel.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let scale = f64::min(
        f64::from(max_width) / f64::from(width),
        f64::from(max_height) / f64::from(height),
    );
    let scaled = |value: u32, bound: u32| {
        ((f64::from(value) * scale).round() as u32).clamp(1, bound.max(1))
    };

    (scaled(width, max_width), scaled(height, max_height))
}

/// Codec for the declared type. Types without an encoder fall back to PNG.
pub fn target_format(declared_mime: &str) -> ImageFormat {
    mime::encodable_format(declared_mime).unwrap_or(ImageFormat::Png)
}

/// Decode `bytes`, fit them inside the option bounds and encode with the
/// codec matching `declared_mime`.
pub fn rasterize(bytes: &[u8], declared_mime: &str, options: &IngestOptions) -> ImageResult<Encoded> {
    let img = image::load_from_memory(bytes)?;
    let (src_width, src_height) = (img.width(), img.height());
    let (width, height) = fit_within(src_width, src_height, options.max_width, options.max_height);

    let img = if (width, height) == (src_width, src_height) {
        img
    } else {
        img.resize_exact(width, height, FilterType::Triangle)
    };

    let format = target_format(declared_mime);
    let bytes = encode(&img, format, options.encoder_quality())?;

    debug!(
        "ingest";
        "{}x{} -> {}x{} as {} ({} bytes)",
        src_width, src_height, width, height, mime::for_format(format), bytes.len()
    );

    Ok(Encoded {
        mime: mime::for_format(format),
        bytes,
        width,
        height,
    })
}

fn encode(img: &DynamicImage, format: ImageFormat, quality: u8) -> ImageResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    match format {
        // JPEG has no alpha channel
        ImageFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
            DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder)?;
        }
        ImageFormat::WebP => {
            DynamicImage::ImageRgba8(img.to_rgba8()).write_to(&mut buf, ImageFormat::WebP)?;
        }
        _ => img.write_to(&mut buf, format)?,
    }
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_fit_within_scales_landscape() {
        assert_eq!(fit_within(1600, 1200, 800, 800), (800, 600));
    }

    #[test]
    fn test_fit_within_scales_portrait() {
        assert_eq!(fit_within(1200, 1600, 800, 800), (600, 800));
    }

    #[test]
    fn test_fit_within_keeps_small_images() {
        assert_eq!(fit_within(640, 480, 800, 800), (640, 480));
        assert_eq!(fit_within(800, 800, 800, 800), (800, 800));
    }

    #[test]
    fn test_fit_within_respects_both_bounds() {
        // Landscape but the height bound is the tighter one
        assert_eq!(fit_within(1000, 900, 800, 300), (333, 300));
        assert_eq!(fit_within(4000, 1000, 1000, 1000), (1000, 250));
    }

    #[test]
    fn test_fit_within_extreme_ratio_keeps_one_pixel() {
        assert_eq!(fit_within(10_000, 1, 100, 100), (100, 1));
    }

    #[test]
    fn test_target_format() {
        assert_eq!(target_format("image/jpeg"), ImageFormat::Jpeg);
        assert_eq!(target_format("image/png"), ImageFormat::Png);
        assert_eq!(target_format("image/webp"), ImageFormat::WebP);
        assert_eq!(target_format("image/gif"), ImageFormat::Png);
        assert_eq!(target_format("image/bmp"), ImageFormat::Png);
    }

    #[test]
    fn test_rasterize_downscales_png() {
        let encoded = rasterize(&png_bytes(1600, 1200), "image/png", &IngestOptions::default()).unwrap();
        assert_eq!(encoded.mime, "image/png");
        assert_eq!((encoded.width, encoded.height), (800, 600));

        let decoded = image::load_from_memory(&encoded.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (800, 600));
    }

    #[test]
    fn test_rasterize_jpeg_with_alpha_source() {
        let img = RgbaImage::from_pixel(40, 20, Rgba([10, 200, 30, 128]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();

        let encoded = rasterize(buf.get_ref(), "image/jpeg", &IngestOptions::default()).unwrap();
        assert_eq!(encoded.mime, "image/jpeg");
        assert_eq!(
            image::guess_format(&encoded.bytes).unwrap(),
            ImageFormat::Jpeg
        );
    }

    #[test]
    fn test_rasterize_lower_quality_is_smaller_jpeg() {
        let source = png_bytes(300, 300);
        let high = IngestOptions {
            quality: 1.0,
            ..IngestOptions::default()
        };
        let low = IngestOptions {
            quality: 0.1,
            ..IngestOptions::default()
        };
        let high = rasterize(&source, "image/jpeg", &high).unwrap();
        let low = rasterize(&source, "image/jpeg", &low).unwrap();
        assert!(low.bytes.len() < high.bytes.len());
    }

    #[test]
    fn test_rasterize_unsupported_codec_falls_back_to_png() {
        let encoded = rasterize(&png_bytes(10, 10), "image/gif", &IngestOptions::default()).unwrap();
        assert_eq!(encoded.mime, "image/png");
        assert_eq!(image::guess_format(&encoded.bytes).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_rasterize_webp() {
        let encoded = rasterize(&png_bytes(16, 8), "image/webp", &IngestOptions::default()).unwrap();
        assert_eq!(encoded.mime, "image/webp");
        assert_eq!(image::guess_format(&encoded.bytes).unwrap(), ImageFormat::WebP);
    }

    #[test]
    fn test_rasterize_rejects_garbage() {
        assert!(rasterize(b"definitely not an image", "image/png", &IngestOptions::default()).is_err());
    }

    #[test]
    fn test_rasterize_is_deterministic() {
        let source = png_bytes(900, 500);
        let options = IngestOptions::default();
        let a = rasterize(&source, "image/jpeg", &options).unwrap();
        let b = rasterize(&source, "image/jpeg", &options).unwrap();
        assert_eq!(a.bytes, b.bytes);
    }
}
