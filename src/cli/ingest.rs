//! `profilekit ingest`: process a profile photo.

use std::path::Path;

use anyhow::Result;

use crate::config::ProfileConfig;
use crate::log;

use super::common::{ingest_file, load_store, save_store, write_output};

/// Process `file` and either print the data URI or store it as `user`'s
/// profile picture.
pub async fn run(
    file: &Path,
    user: Option<&str>,
    mime: Option<&str>,
    output: Option<&Path>,
    config: &ProfileConfig,
) -> Result<()> {
    let uri = ingest_file(file, mime, config).await?;

    let Some(user) = user else {
        return write_output(&uri, output);
    };

    let mut store = load_store(config)?;
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    store
        .users
        .update_profile(user, |profile| profile.profile_picture_name = Some(file_name));
    store.images.set_profile_picture(user, uri);
    save_store(&store, config)?;

    log!("store"; "profile picture saved for `{}`", user);
    Ok(())
}
