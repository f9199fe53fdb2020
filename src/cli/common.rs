//! Common utilities shared across CLI commands.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::ProfileConfig;
use crate::ingest::{self, UploadedImage};
use crate::log;
use crate::store::LocalStore;

/// Load the local store the config points at.
pub fn load_store(config: &ProfileConfig) -> Result<LocalStore> {
    let path = config.store_path();
    LocalStore::load(&path).with_context(|| format!("failed to open store {}", path.display()))
}

/// Persist the store the config points at.
pub fn save_store(store: &LocalStore, config: &ProfileConfig) -> Result<()> {
    let path = config.store_path();
    store
        .persist(&path)
        .with_context(|| format!("failed to save store {}", path.display()))?;
    Ok(())
}

/// Run the ingest pipeline on a file with the configured options.
pub async fn ingest_file(path: &Path, mime: Option<&str>, config: &ProfileConfig) -> Result<String> {
    let upload = match mime {
        Some(mime) => UploadedImage::from_path_with_mime(path, mime).await,
        None => UploadedImage::from_path(path).await,
    }
    .with_context(|| format!("failed to open {}", path.display()))?;

    let uri = ingest::process(Some(&upload), &config.ingest_options())
        .await
        .map_err(|e| {
            let action = if e.is_validation() { "rejected" } else { "failed to process" };
            anyhow::Error::new(e).context(format!("{} {}", action, path.display()))
        })?;
    log!(
        "ingest";
        "{} -> {}KB",
        upload.name(),
        ingest::approx_decoded_kb(&uri).round()
    );
    Ok(uri)
}

/// Write `content` to a file, or to stdout when no path is given.
pub fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let mut file = fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            writeln!(file, "{}", content)?;
            log!("output"; "wrote {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &Path) -> ProfileConfig {
        let mut config = ProfileConfig {
            root: dir.to_path_buf(),
            ..ProfileConfig::default()
        };
        config.store.path = "store.json".into();
        config
    }

    #[test]
    fn test_store_round_trip_through_config() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());

        let mut store = load_store(&config).unwrap();
        store.users.set_current_user("Cher");
        save_store(&store, &config).unwrap();

        assert!(dir.path().join("store.json").exists());
        assert_eq!(load_store(&config).unwrap().users.current_user(), Some("Cher"));
    }

    #[tokio::test]
    async fn test_ingest_file_rejects_non_image() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();

        let err = ingest_file(&path, None, &config_in(dir.path())).await.unwrap_err();
        assert!(err.to_string().starts_with("rejected"));
        assert!(format!("{err:#}").contains("Please select an image file"));
    }

    #[tokio::test]
    async fn test_ingest_file_reports_decode_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, "not really a png").unwrap();

        let err = ingest_file(&path, None, &config_in(dir.path())).await.unwrap_err();
        assert!(err.to_string().starts_with("failed to process"));
        assert!(format!("{err:#}").contains("broken.png"));
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        write_output("data:,x", Some(&path)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "data:,x\n");
    }
}
