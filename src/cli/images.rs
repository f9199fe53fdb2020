//! `profilekit images`: inspect and edit stored images.

use std::path::Path;

use anyhow::{Result, bail};

use crate::cli::ImagesAction;
use crate::config::ProfileConfig;
use crate::ingest::approx_decoded_kb;
use crate::log;
use crate::store::{LocalStore, ProjectImage};

use super::common::{ingest_file, load_store, save_store};

pub async fn run(action: &ImagesAction, config: &ProfileConfig) -> Result<()> {
    let mut store = load_store(config)?;

    match action {
        ImagesAction::List => {
            print!("{}", render_list(&store));
            return Ok(());
        }
        ImagesAction::Remove { user } => {
            if store.images.remove_profile_picture(user).is_none() {
                bail!("no profile picture stored for `{}`", user);
            }
            log!("store"; "removed profile picture of `{}`", user);
        }
        ImagesAction::Clear { user } => {
            if !store.images.clear_user(user) {
                bail!("no images stored for `{}`", user);
            }
            log!("store"; "cleared images of `{}`", user);
        }
        ImagesAction::AddProject { user, file, id, .. } => {
            let image = add_project(&mut store, user, file, id.as_deref(), config).await?;
            log!("store"; "added project image `{}` for `{}`", image, user);
        }
        ImagesAction::RemoveProject { user, id } => {
            if !store.images.remove_project_image(user, id) {
                bail!("no project image `{}` stored for `{}`", id, user);
            }
            log!("store"; "removed project image `{}` of `{}`", id, user);
        }
    }

    save_store(&store, config)
}

async fn add_project(
    store: &mut LocalStore,
    user: &str,
    file: &Path,
    id: Option<&str>,
    config: &ProfileConfig,
) -> Result<String> {
    let uri = ingest_file(file, None, config).await?;
    let image = match id {
        Some(id) => ProjectImage::with_id(id, uri),
        None => ProjectImage::new(uri),
    };
    let id = image.id.clone();
    store.images.add_project_image(user, image);
    Ok(id)
}

/// One line per stored image with its approximate size.
fn render_list(store: &LocalStore) -> String {
    let mut out = String::new();

    out.push_str("profile pictures:\n");
    for (user, uri) in store.images.profile_pictures() {
        out.push_str(&format!("  {:<24} {:>6.1}KB\n", user, approx_decoded_kb(uri)));
    }

    out.push_str("project images:\n");
    for user in store.images.project_image_users() {
        for image in store.images.project_images(user) {
            out.push_str(&format!(
                "  {:<24} {:<12} {:>6.1}KB\n",
                user,
                image.id,
                approx_decoded_kb(&image.base64_image)
            ));
        }
    }
    out
}
