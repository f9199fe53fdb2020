//! Image namespaces: one profile picture per user, a list of project
//! images per user.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::avatar::{AvatarSink, SeededAvatar};

/// Length of a content-derived project image id.
const IMAGE_ID_LEN: usize = 12;

/// A stored project image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectImage {
    pub id: String,
    pub base64_image: String,
}

impl ProjectImage {
    /// Image with an id derived from its content.
    pub fn new(base64_image: impl Into<String>) -> Self {
        let base64_image = base64_image.into();
        Self {
            id: content_id(&base64_image),
            base64_image,
        }
    }

    pub fn with_id(id: impl Into<String>, base64_image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            base64_image: base64_image.into(),
        }
    }
}

/// First hex chars of the blake3 hash of a data URI.
pub fn content_id(data_uri: &str) -> String {
    blake3::hash(data_uri.as_bytes()).to_hex().as_str()[..IMAGE_ID_LEN].to_string()
}

/// `images` slice of the local store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageStore {
    profile_pictures: BTreeMap<String, String>,
    project_images: BTreeMap<String, Vec<ProjectImage>>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    // === Profile pictures ===

    /// Set (or replace) the profile picture for `user`.
    pub fn set_profile_picture(&mut self, user: impl Into<String>, data_uri: impl Into<String>) {
        self.profile_pictures.insert(user.into(), data_uri.into());
    }

    /// Remove the profile picture for `user`, returning it.
    pub fn remove_profile_picture(&mut self, user: &str) -> Option<String> {
        self.profile_pictures.remove(user)
    }

    pub fn profile_picture(&self, user: &str) -> Option<&str> {
        self.profile_pictures.get(user).map(String::as_str)
    }

    /// Move the picture stored under `from` to `to`. Does nothing when
    /// `from` has no picture or both keys are the same.
    pub fn rename_profile_picture(&mut self, from: &str, to: &str) -> bool {
        if from == to {
            return false;
        }
        match self.profile_pictures.remove(from) {
            Some(data_uri) => {
                self.profile_pictures.insert(to.to_string(), data_uri);
                true
            }
            None => false,
        }
    }

    /// Iterate over `(user, data_uri)` pairs in key order.
    pub fn profile_pictures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.profile_pictures
            .iter()
            .map(|(user, uri)| (user.as_str(), uri.as_str()))
    }

    // === Project images ===

    /// Append a project image for `user`.
    pub fn add_project_image(&mut self, user: impl Into<String>, image: ProjectImage) {
        self.project_images.entry(user.into()).or_default().push(image);
    }

    /// Remove every project image of `user` with the given id. A user
    /// left without project images is dropped from the namespace.
    pub fn remove_project_image(&mut self, user: &str, id: &str) -> bool {
        let Some(images) = self.project_images.get_mut(user) else {
            return false;
        };
        let before = images.len();
        images.retain(|image| image.id != id);
        let removed = images.len() < before;
        if images.is_empty() {
            self.project_images.remove(user);
        }
        removed
    }

    pub fn project_images(&self, user: &str) -> &[ProjectImage] {
        self.project_images.get(user).map_or(&[], Vec::as_slice)
    }

    /// Users with at least one project image entry.
    pub fn project_image_users(&self) -> impl Iterator<Item = &str> {
        self.project_images.keys().map(String::as_str)
    }

    // === Combined ===

    /// Drop both the profile picture and all project images of `user`.
    pub fn clear_user(&mut self, user: &str) -> bool {
        let picture = self.profile_pictures.remove(user).is_some();
        let projects = self.project_images.remove(user).is_some();
        picture || projects
    }

    pub fn is_empty(&self) -> bool {
        self.profile_pictures.is_empty() && self.project_images.is_empty()
    }
}

impl AvatarSink for ImageStore {
    fn accept(&mut self, avatar: SeededAvatar) -> Result<()> {
        self.set_profile_picture(avatar.name, avatar.data_uri);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_picture_set_replace_remove() {
        let mut store = ImageStore::new();
        store.set_profile_picture("Jane Doe", "data:image/png;base64,AAA");
        store.set_profile_picture("Jane Doe", "data:image/png;base64,BBB");
        assert_eq!(store.profile_picture("Jane Doe"), Some("data:image/png;base64,BBB"));

        assert_eq!(
            store.remove_profile_picture("Jane Doe").as_deref(),
            Some("data:image/png;base64,BBB")
        );
        assert!(store.remove_profile_picture("Jane Doe").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_rename_profile_picture() {
        let mut store = ImageStore::new();
        store.set_profile_picture("temp_k3j9x2a", "data:image/png;base64,AAA");

        assert!(store.rename_profile_picture("temp_k3j9x2a", "Jane Doe"));
        assert!(store.profile_picture("temp_k3j9x2a").is_none());
        assert_eq!(store.profile_picture("Jane Doe"), Some("data:image/png;base64,AAA"));

        assert!(!store.rename_profile_picture("Jane Doe", "Jane Doe"));
        assert!(!store.rename_profile_picture("nobody", "Jane Doe"));
    }

    #[test]
    fn test_project_images() {
        let mut store = ImageStore::new();
        store.add_project_image("Cher", ProjectImage::with_id("a", "data:,1"));
        store.add_project_image("Cher", ProjectImage::with_id("b", "data:,2"));
        assert_eq!(store.project_images("Cher").len(), 2);

        assert!(store.remove_project_image("Cher", "a"));
        assert!(!store.remove_project_image("Cher", "a"));
        assert!(!store.remove_project_image("nobody", "b"));
        assert_eq!(store.project_images("Cher")[0].id, "b");
        assert!(store.project_images("nobody").is_empty());
    }

    #[test]
    fn test_clear_user_removes_both_namespaces() {
        let mut store = ImageStore::new();
        store.set_profile_picture("Cher", "data:,p");
        store.add_project_image("Cher", ProjectImage::new("data:,x"));
        store.set_profile_picture("Tony Smith", "data:,t");

        assert!(store.clear_user("Cher"));
        assert!(store.profile_picture("Cher").is_none());
        assert!(store.project_images("Cher").is_empty());
        assert_eq!(store.project_image_users().count(), 0);
        assert!(store.profile_picture("Tony Smith").is_some());
        assert!(!store.clear_user("Cher"));
    }

    #[test]
    fn test_removing_last_project_image_drops_user() {
        let mut store = ImageStore::new();
        store.add_project_image("Cher", ProjectImage::with_id("a", "data:image/png;base64,AAAA"));

        assert!(store.remove_project_image("Cher", "a"));
        assert!(store.is_empty());
        assert_eq!(store.project_image_users().count(), 0);
        assert!(!store.clear_user("Cher"));
        assert_eq!(
            serde_json::to_value(&store).unwrap()["projectImages"],
            json!({})
        );
    }

    #[test]
    fn test_content_id() {
        let a = ProjectImage::new("data:image/png;base64,AAA");
        let b = ProjectImage::new("data:image/png;base64,AAA");
        let c = ProjectImage::new("data:image/png;base64,AAB");
        assert_eq!(a.id.len(), 12);
        assert!(a.id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_serialized_layout() {
        let mut store = ImageStore::new();
        store.set_profile_picture("Cher", "data:,p");
        store.add_project_image("Cher", ProjectImage::with_id("x1", "data:,x"));

        let value = serde_json::to_value(&store).unwrap();
        assert_eq!(
            value,
            json!({
                "profilePictures": {"Cher": "data:,p"},
                "projectImages": {"Cher": [{"id": "x1", "base64Image": "data:,x"}]}
            })
        );
    }

    #[test]
    fn test_missing_namespaces_default() {
        let store: ImageStore = serde_json::from_str("{}").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_avatar_sink() {
        let mut store = ImageStore::new();
        let records = [json!({"name": "Jane Doe"}), json!({"name": "Cher"})];
        let report = crate::avatar::batch::seed_records(&records, 400, &mut store);

        assert_eq!(report.generated, 2);
        assert_eq!(
            store.profile_picture("Cher"),
            Some(crate::avatar::generate_avatar_data_uri(Some("Cher"), 400).as_str())
        );
    }
}
