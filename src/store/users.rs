//! User directory: the signed-in user, profiles by full name, and the
//! username to full name mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::profile::Profile;

/// `users` slice of the local store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDirectory {
    current_user: Option<String>,
    profiles: BTreeMap<String, Profile>,
    full_name_map: BTreeMap<String, String>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    // === Current user ===

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    pub fn set_current_user(&mut self, full_name: impl Into<String>) {
        self.current_user = Some(full_name.into());
    }

    pub fn clear_current_user(&mut self) {
        self.current_user = None;
    }

    // === Profiles ===

    pub fn profile(&self, full_name: &str) -> Option<&Profile> {
        self.profiles.get(full_name)
    }

    /// Insert or replace the profile stored under `full_name`.
    pub fn set_profile(&mut self, full_name: impl Into<String>, profile: Profile) {
        self.profiles.insert(full_name.into(), profile);
    }

    /// Modify an existing profile in place. Returns false if there is none.
    pub fn update_profile(&mut self, full_name: &str, update: impl FnOnce(&mut Profile)) -> bool {
        match self.profiles.get_mut(full_name) {
            Some(profile) => {
                update(profile);
                true
            }
            None => false,
        }
    }

    /// Remove a profile along with the usernames mapped to it. Signs the
    /// user out if it was the current one.
    pub fn delete_profile(&mut self, full_name: &str) -> Option<Profile> {
        let removed = self.profiles.remove(full_name)?;
        self.full_name_map.retain(|_, name| name != full_name);
        if self.current_user.as_deref() == Some(full_name) {
            self.current_user = None;
        }
        Some(removed)
    }

    /// Iterate over `(full_name, profile)` pairs in key order.
    pub fn profiles(&self) -> impl Iterator<Item = (&str, &Profile)> {
        self.profiles.iter().map(|(name, p)| (name.as_str(), p))
    }

    // === Username mapping ===

    pub fn map_username(&mut self, username: impl Into<String>, full_name: impl Into<String>) {
        self.full_name_map.insert(username.into(), full_name.into());
    }

    pub fn full_name_for(&self, username: &str) -> Option<&str> {
        self.full_name_map.get(username).map(String::as_str)
    }

    /// Resolve either a username or a full name to a stored profile.
    pub fn lookup(&self, key: &str) -> Option<(&str, &Profile)> {
        let full_name = self.full_name_for(key).unwrap_or(key);
        self.profiles
            .get_key_value(full_name)
            .map(|(name, profile)| (name.as_str(), profile))
    }

    pub fn is_empty(&self) -> bool {
        self.current_user.is_none() && self.profiles.is_empty() && self.full_name_map.is_empty()
    }
}
