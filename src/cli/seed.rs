//! `profilekit seed`: store default avatars for a users file.

use std::path::Path;

use anyhow::Result;

use crate::avatar::{AvatarSink, SeededAvatar, read_users, seed_records};
use crate::config::ProfileConfig;
use crate::log;
use crate::logger::ProgressLine;

use super::common::{load_store, save_store};

pub async fn run(users: &Path, config: &ProfileConfig) -> Result<()> {
    let records = read_users(users).await;
    if records.is_empty() {
        return Ok(());
    }

    let mut store = load_store(config)?;
    let progress = ProgressLine::new("seed", &[("avatars", records.len())]);
    let mut sink = |avatar: SeededAvatar| -> Result<()> {
        store.images.accept(avatar)?;
        progress.inc("avatars");
        Ok(())
    };
    let report = seed_records(&records, config.avatar.seed_size, &mut sink);
    progress.finish();

    if report.generated > 0 {
        save_store(&store, config)?;
    }
    log!(
        "seed";
        "generated {} default avatars ({} skipped, {} failed)",
        report.generated,
        report.skipped,
        report.failed
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avatar::generate_avatar_data_uri;
    use std::fs;
    use tempfile::TempDir;

    fn config_in(dir: &Path) -> ProfileConfig {
        let mut config = ProfileConfig {
            root: dir.to_path_buf(),
            ..ProfileConfig::default()
        };
        config.store.path = "store.json".into();
        config.avatar.seed_size = 64;
        config
    }

    #[tokio::test]
    async fn test_seeds_into_store() {
        let dir = TempDir::new().unwrap();
        let users = dir.path().join("users.json");
        fs::write(&users, r#"[{"name": "Jane Doe"}, {"name": "Cher"}, {}]"#).unwrap();
        let config = config_in(dir.path());

        run(&users, &config).await.unwrap();

        let store = load_store(&config).unwrap();
        assert_eq!(
            store.images.profile_picture("Jane Doe"),
            Some(generate_avatar_data_uri(Some("Jane Doe"), 64).as_str())
        );
        assert!(store.images.profile_picture("Cher").is_some());
        assert_eq!(store.images.profile_pictures().count(), 2);
    }

    #[tokio::test]
    async fn test_unreadable_users_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());

        run(&dir.path().join("absent.json"), &config).await.unwrap();
        assert!(!dir.path().join("store.json").exists());
    }
}
