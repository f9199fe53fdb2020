//! `profilekit profile`: submit, show and delete profiles.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use crate::cli::ProfileAction;
use crate::config::ProfileConfig;
use crate::log;
use crate::profile::{self, FormMode, SignupForm};
use crate::store::LocalStore;

use super::common::{load_store, save_store};

pub fn run(action: &ProfileAction, config: &ProfileConfig) -> Result<()> {
    let mut store = load_store(config)?;

    match action {
        ProfileAction::Submit {
            form,
            edit,
            image_key,
        } => {
            let mode = if *edit { FormMode::Edit } else { FormMode::Signup };
            submit(&mut store, form, mode, image_key.as_deref())?;
        }
        ProfileAction::Show { name } => {
            println!("{}", show(&store, name.as_deref())?);
            return Ok(());
        }
        ProfileAction::Delete { name } => {
            let full_name = resolve(&store, name)?;
            store.forget_user(&full_name);
            log!("profile"; "deleted `{}`", full_name);
        }
        ProfileAction::Whoami => {
            match store.users.current_user() {
                Some(user) => println!("{}", user),
                None => log!("profile"; "not signed in"),
            }
            return Ok(());
        }
        ProfileAction::Logout => {
            if let Some(user) = store.users.current_user() {
                log!("profile"; "signed out `{}`", user);
            }
            store.users.clear_current_user();
        }
    }

    save_store(&store, config)
}

fn submit(store: &mut LocalStore, path: &Path, mode: FormMode, image_key: Option<&str>) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let form: SignupForm = serde_json::from_str(&content)
        .with_context(|| format!("invalid form in {}", path.display()))?;

    profile::submit(store, form, mode, image_key)?;
    Ok(())
}

/// Pretty JSON of the named profile, or of the current user.
fn show(store: &LocalStore, name: Option<&str>) -> Result<String> {
    let key = match name {
        Some(name) => name,
        None => store
            .users
            .current_user()
            .ok_or_else(|| anyhow!("not signed in, pass a name"))?,
    };
    let (_, profile) = store
        .users
        .lookup(key)
        .ok_or_else(|| anyhow!("no profile for `{}`", key))?;
    Ok(serde_json::to_string_pretty(profile)?)
}

fn resolve(store: &LocalStore, key: &str) -> Result<String> {
    store
        .users
        .lookup(key)
        .map(|(full_name, _)| full_name.to_string())
        .ok_or_else(|| anyhow!("no profile for `{}`", key))
}
