//! `profilekit avatar`: print the default avatar for a name.

use std::path::Path;

use anyhow::Result;

use crate::avatar::{color_from_name, generate_avatar_data_uri, initials_from_name, render_svg};
use crate::config::ProfileConfig;
use crate::log;

use super::common::write_output;

pub fn run(name: &str, svg: bool, output: Option<&Path>, config: &ProfileConfig) -> Result<()> {
    let size = config.avatar.size;
    let name = Some(name);

    log!(
        "avatar";
        "{} {} ({}px)",
        initials_from_name(name),
        color_from_name(name),
        size
    );

    let content = if svg {
        render_svg(name, size)
    } else {
        generate_avatar_data_uri(name, size)
    };
    write_output(&content, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_writes_svg_and_uri() {
        let dir = TempDir::new().unwrap();
        let mut config = ProfileConfig::default();
        config.avatar.size = 64;

        let svg_path = dir.path().join("a.svg");
        run("Jane Doe", true, Some(&svg_path), &config).unwrap();
        let svg = fs::read_to_string(&svg_path).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(">JD<"));

        let uri_path = dir.path().join("a.txt");
        run("Jane Doe", false, Some(&uri_path), &config).unwrap();
        assert_eq!(
            fs::read_to_string(&uri_path).unwrap().trim_end(),
            generate_avatar_data_uri(Some("Jane Doe"), 64)
        );
    }
}
