//! Deterministic placeholder avatars.
//!
//! A display name maps to a palette color, to one or two initials, and to
//! a self-contained SVG square encoded as a base64 data URI. Everything
//! here is a total, pure function: the same name and size always produce
//! byte-identical output.
//!
//! # Modules
//!
//! - [`batch`]: seed avatars for a list of users read from a JSON file
//!
//! ```text
//! "Jane Doe" ──► color_from_name ──► #ef4444
//!            └─► initials_from_name ──► "JD"
//!                         │
//!                         ▼
//!                    render_svg ──► data:image/svg+xml;base64,...
//! ```

pub mod batch;

pub use batch::{AvatarSink, SeedReport, SeededAvatar, read_users, seed_avatars, seed_records};

use quick_xml::escape::escape;

use crate::utils::{data_uri, mime};

/// Avatar palette. Order is part of the output contract.
pub const AVATAR_COLORS: [&str; 12] = [
    "#ef4444", // red
    "#f97316", // orange
    "#f59e0b", // amber
    "#84cc16", // lime
    "#22c55e", // green
    "#14b8a6", // teal
    "#06b6d4", // cyan
    "#3b82f6", // blue
    "#6366f1", // indigo
    "#8b5cf6", // violet
    "#a855f7", // purple
    "#ec4899", // pink
];

/// Side length used when the caller does not pick one.
pub const DEFAULT_AVATAR_SIZE: u32 = 200;

/// Initials returned for empty or missing names.
pub const UNKNOWN_INITIALS: &str = "?";

/// String hash over UTF-16 code units.
///
/// The shift happens on the 32-bit truncation of the running value while
/// the add and subtract keep full width, so the accumulator can leave the
/// `i32` range. Color assignment depends on reproducing this exactly.
pub fn name_hash(name: &str) -> i64 {
    name.encode_utf16().fold(0i64, |hash, unit| {
        #[allow(clippy::cast_possible_truncation)]
        let shifted = (hash as i32).wrapping_shl(5);
        i64::from(unit)
            .wrapping_add(i64::from(shifted))
            .wrapping_sub(hash)
    })
}

/// Palette color for a name. Empty or missing names get the first color.
pub fn color_from_name(name: Option<&str>) -> &'static str {
    match name {
        Some(name) if !name.is_empty() => {
            let len = AVATAR_COLORS.len() as u64;
            #[allow(clippy::cast_possible_truncation)]
            let index = (name_hash(name).unsigned_abs() % len) as usize;
            AVATAR_COLORS[index]
        }
        _ => AVATAR_COLORS[0],
    }
}

/// One or two uppercase initials.
///
/// Single-word names give their first letter, longer names give the first
/// letters of the first and last words.
pub fn initials_from_name(name: Option<&str>) -> String {
    let Some(name) = name else {
        return UNKNOWN_INITIALS.to_string();
    };

    let mut parts = name.split(is_name_separator).filter(|part| !part.is_empty());
    let Some(first) = parts.next() else {
        return UNKNOWN_INITIALS.to_string();
    };

    let mut initials = String::with_capacity(8);
    initials.extend(first.chars().next());
    if let Some(last) = parts.last() {
        initials.extend(last.chars().next());
    }
    initials.to_uppercase()
}

/// Whitespace that separates name tokens: Unicode `White_Space` without
/// U+0085, plus the U+FEFF byte order mark.
fn is_name_separator(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{0085}')
}

/// SVG markup for an avatar of `size` × `size` pixels.
pub fn render_svg(name: Option<&str>, size: u32) -> String {
    let initials = initials_from_name(name);
    let background = color_from_name(name);
    let font_size = f64::from(size) * 0.4;

    format!(
        concat!(
            r#"<svg width="{size}" height="{size}" xmlns="http://www.w3.org/2000/svg">"#,
            r#"<rect width="{size}" height="{size}" fill="{background}"/>"#,
            r#"<text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle" "#,
            r#"font-family="Arial, sans-serif" font-size="{font_size}" font-weight="bold" "#,
            r#"fill="white">{initials}</text>"#,
            "</svg>"
        ),
        size = size,
        background = background,
        font_size = font_size,
        initials = escape(initials.as_str()),
    )
}

/// Avatar as a `data:image/svg+xml;base64,...` URI.
pub fn generate_avatar_data_uri(name: Option<&str>, size: u32) -> String {
    data_uri::encode(mime::types::SVG, render_svg(name, size).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::data_uri::DataUri;

    fn decode(uri: &str) -> String {
        let parsed = DataUri::parse(uri).unwrap();
        assert_eq!(parsed.mime, "image/svg+xml");
        String::from_utf8(parsed.data).unwrap()
    }

    #[test]
    fn test_hash_matches_reference_values() {
        assert_eq!(name_hash("a"), 97);
        assert_eq!(name_hash("Cher"), 2_099_186);
        assert_eq!(name_hash("Jane Doe"), -5_038_973_112);
        assert_eq!(name_hash("Hyung Lee"), 3_143_025_001);
        assert_eq!(name_hash("Amina Johnson"), -8_200_126_345);
        // Non-BMP characters hash as two UTF-16 units
        assert_eq!(name_hash("😀 Smile"), 2_705_722_859);
    }

    #[test]
    fn test_color_reference_assignments() {
        assert_eq!(color_from_name(Some("Jane Doe")), "#ef4444");
        assert_eq!(color_from_name(Some("Cher")), "#f59e0b");
        assert_eq!(color_from_name(Some("Hyung Lee")), "#f97316");
        assert_eq!(color_from_name(Some("Carlos Perez")), "#06b6d4");
        assert_eq!(color_from_name(Some("Mohammed Ali")), "#22c55e");
        assert_eq!(color_from_name(Some("Tony Smith")), "#ec4899");
        assert_eq!(color_from_name(Some("John Paul")), "#8b5cf6");
        assert_eq!(color_from_name(Some("Zoë Saldaña")), "#8b5cf6");
        assert_eq!(
            color_from_name(Some("Bartholomew Fitzgerald-Worthington III")),
            "#14b8a6"
        );
        assert_eq!(color_from_name(Some(" ")), "#6366f1");
    }

    #[test]
    fn test_color_empty_and_missing() {
        assert_eq!(color_from_name(Some("")), AVATAR_COLORS[0]);
        assert_eq!(color_from_name(None), AVATAR_COLORS[0]);
    }

    #[test]
    fn test_color_is_deterministic_and_in_palette() {
        let long = "x".repeat(10_000);
        for name in ["Sara Kim", "李小龙", "a b c d", long.as_str()] {
            let color = color_from_name(Some(name));
            assert!(AVATAR_COLORS.contains(&color));
            assert_eq!(color, color_from_name(Some(name)));
        }
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials_from_name(Some("Jane Doe")), "JD");
        assert_eq!(initials_from_name(Some("Cher")), "C");
        assert_eq!(initials_from_name(Some("")), "?");
        assert_eq!(initials_from_name(None), "?");
        assert_eq!(initials_from_name(Some("   ")), "?");
        assert_eq!(initials_from_name(Some("  mary  ann   smith ")), "MS");
        assert_eq!(initials_from_name(Some("jean\tluc\npicard")), "JP");
        assert_eq!(initials_from_name(Some("élodie durand")), "ÉD");
    }

    #[test]
    fn test_initials_separator_set() {
        assert_eq!(initials_from_name(Some("\u{feff}Jane Doe")), "JD");
        assert_eq!(initials_from_name(Some("Jane\u{feff}Doe")), "JD");
        assert_eq!(initials_from_name(Some("\u{feff}")), "?");
        assert_eq!(initials_from_name(Some("Jane\u{3000}Doe")), "JD");
        // NEL is not a separator, so this is a single token
        assert_eq!(initials_from_name(Some("Jane\u{0085}Doe")), "J");
    }

    #[test]
    fn test_svg_contents() {
        let svg = decode(&generate_avatar_data_uri(Some("Jane Doe"), 200));
        assert!(svg.starts_with("<svg width=\"200\" height=\"200\""));
        assert!(svg.contains("fill=\"#ef4444\""));
        assert!(svg.contains(">JD</text>"));
        assert!(svg.contains("font-size=\"80\""));
        assert!(svg.contains("font-weight=\"bold\""));
        assert!(svg.contains("fill=\"white\""));
    }

    #[test]
    fn test_svg_font_size_formatting() {
        assert!(render_svg(Some("A"), 120).contains("font-size=\"48\""));
        assert!(render_svg(Some("A"), 64).contains("font-size=\"25.6\""));
        assert!(render_svg(Some("A"), 3).contains("font-size=\"1.2000000000000002\""));
    }

    #[test]
    fn test_svg_escapes_initials() {
        let svg = render_svg(Some("<script> &co"), 100);
        assert!(svg.contains(">&lt;&amp;</text>"));
        assert!(!svg.contains("<S"));
    }

    #[test]
    fn test_svg_is_well_formed_xml() {
        use quick_xml::Reader;
        use quick_xml::events::Event;

        let svg = render_svg(Some("Ö <b> \"q\""), 50);
        let mut reader = Reader::from_str(&svg);
        let mut depth = 0i32;
        loop {
            match reader.read_event().unwrap() {
                Event::Start(_) => depth += 1,
                Event::End(_) => depth -= 1,
                Event::Eof => break,
                _ => {}
            }
        }
        assert_eq!(depth, 0);
    }

    #[test]
    fn test_non_ascii_round_trip() {
        let svg = decode(&generate_avatar_data_uri(Some("李 小龙"), 200));
        assert!(svg.contains(">李小</text>"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate_avatar_data_uri(Some("Amina Johnson"), 400);
        let b = generate_avatar_data_uri(Some("Amina Johnson"), 400);
        assert_eq!(a, b);
        assert_ne!(a, generate_avatar_data_uri(Some("Amina Johnson"), 200));
    }

    #[test]
    fn test_missing_name_avatar() {
        let svg = decode(&generate_avatar_data_uri(None, DEFAULT_AVATAR_SIZE));
        assert!(svg.contains(">?</text>"));
        assert!(svg.contains(AVATAR_COLORS[0]));
    }
}
