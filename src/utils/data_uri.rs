//! `data:` URI encoding and decoding.
//!
//! Everything the crate hands back to callers is a base64 data URI of the
//! form `data:<mime>;base64,<payload>`. Parsing also accepts the
//! percent-encoded form (`data:<mime>,<text>`) so stored values written
//! by other tools can be read back.

use std::borrow::Cow;

use base64::{Engine, engine::general_purpose::STANDARD};
use percent_encoding::percent_decode_str;
use thiserror::Error;

/// Errors from [`DataUri::parse`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataUriError {
    #[error("not a data URI (missing `data:` scheme)")]
    MissingScheme,

    #[error("malformed data URI (missing `,` separator)")]
    MissingSeparator,

    #[error("invalid base64 payload: {0}")]
    Base64(String),
}

/// Build `data:<mime>;base64,<payload>` from raw bytes.
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    let payload = STANDARD.encode(bytes);
    let mut uri = String::with_capacity(mime.len() + payload.len() + 13);
    uri.push_str("data:");
    uri.push_str(mime);
    uri.push_str(";base64,");
    uri.push_str(&payload);
    uri
}

/// Approximate decoded size in bytes of a base64 data URI.
///
/// Uses the whole string length, header included, times 3/4. Cheap and
/// good enough for storage-capacity warnings.
#[allow(clippy::cast_precision_loss)]
pub fn approx_decoded_bytes(uri: &str) -> f64 {
    uri.len() as f64 * 0.75
}

/// A parsed data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri<'a> {
    /// Media type, `text/plain;charset=US-ASCII` when omitted.
    pub mime: Cow<'a, str>,
    /// Decoded payload bytes.
    pub data: Vec<u8>,
}

impl<'a> DataUri<'a> {
    /// Parse a data URI and decode its payload.
    pub fn parse(uri: &'a str) -> Result<Self, DataUriError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or(DataUriError::MissingScheme)?;
        let (header, payload) = rest.split_once(',').ok_or(DataUriError::MissingSeparator)?;

        let (mime, is_base64) = match header.strip_suffix(";base64") {
            Some(mime) => (mime, true),
            None => (header, false),
        };

        let data = if is_base64 {
            STANDARD
                .decode(payload.trim())
                .map_err(|e| DataUriError::Base64(e.to_string()))?
        } else {
            percent_decode_str(payload).collect()
        };

        let mime = if mime.is_empty() {
            Cow::Borrowed("text/plain;charset=US-ASCII")
        } else {
            Cow::Borrowed(mime)
        };

        Ok(Self { mime, data })
    }

    /// Media type without parameters (`image/svg+xml`).
    pub fn essence(&self) -> &str {
        self.mime.split(';').next().unwrap_or_default().trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        assert_eq!(encode("image/png", b"abc"), "data:image/png;base64,YWJj");
        assert_eq!(encode("image/png", b""), "data:image/png;base64,");
    }

    #[test]
    fn test_parse_base64() {
        let uri = encode("image/jpeg", &[0xff, 0xd8, 0x00, 0x10]);
        let parsed = DataUri::parse(&uri).unwrap();
        assert_eq!(parsed.mime, "image/jpeg");
        assert_eq!(parsed.data, vec![0xff, 0xd8, 0x00, 0x10]);
    }

    #[test]
    fn test_parse_percent_encoded() {
        let parsed = DataUri::parse("data:image/svg+xml,%3Csvg%2F%3E").unwrap();
        assert_eq!(parsed.essence(), "image/svg+xml");
        assert_eq!(parsed.data, b"<svg/>");
    }

    #[test]
    fn test_parse_default_mime() {
        let parsed = DataUri::parse("data:,hello").unwrap();
        assert_eq!(parsed.essence(), "text/plain");
        assert_eq!(parsed.data, b"hello");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            DataUri::parse("http://example.com").unwrap_err(),
            DataUriError::MissingScheme
        );
        assert_eq!(
            DataUri::parse("data:image/png;base64").unwrap_err(),
            DataUriError::MissingSeparator
        );
        assert!(matches!(
            DataUri::parse("data:image/png;base64,@@@").unwrap_err(),
            DataUriError::Base64(_)
        ));
    }

    #[test]
    fn test_approx_decoded_bytes() {
        assert!((approx_decoded_bytes("abcd") - 3.0).abs() < f64::EPSILON);
        assert!(approx_decoded_bytes("").abs() < f64::EPSILON);
    }
}
