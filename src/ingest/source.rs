//! Uploaded image handle.

use std::io;
use std::path::{Path, PathBuf};

use crate::utils::mime;

/// Where the bytes of an upload live.
#[derive(Debug, Clone)]
enum Content {
    Bytes(Vec<u8>),
    Path(PathBuf),
}

/// A user-supplied file: declared name, MIME type and size, plus content
/// that is only read when the pipeline gets past validation.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    name: String,
    mime: String,
    size: u64,
    content: Content,
}

impl UploadedImage {
    /// In-memory upload. The declared size is the buffer length.
    pub fn from_bytes(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size: bytes.len() as u64,
            content: Content::Bytes(bytes),
        }
    }

    /// Upload backed by a file. MIME is guessed from the extension and the
    /// size comes from the file metadata.
    pub async fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        Self::from_path_with_mime(path, mime::from_path(path)).await
    }

    /// Upload backed by a file with an explicit declared MIME type.
    pub async fn from_path_with_mime(
        path: impl AsRef<Path>,
        mime: impl Into<String>,
    ) -> io::Result<Self> {
        let path = path.as_ref();
        let size = tokio::fs::metadata(path).await?.len();
        Ok(Self::from_parts(display_name(path), mime, size, path))
    }

    /// Upload from declared attributes only. Nothing is touched on disk
    /// until the content is read.
    pub fn from_parts(
        name: impl Into<String>,
        mime: impl Into<String>,
        size: u64,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size,
            content: Content::Path(path.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Read the full content.
    pub async fn read(&self) -> io::Result<Vec<u8>> {
        match &self.content {
            Content::Bytes(bytes) => Ok(bytes.clone()),
            Content::Path(path) => tokio::fs::read(path).await,
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_from_bytes_attributes() {
        let upload = UploadedImage::from_bytes("me.png", "image/png", vec![1, 2, 3]);
        assert_eq!(upload.name(), "me.png");
        assert_eq!(upload.mime(), "image/png");
        assert_eq!(upload.size(), 3);
    }

    #[tokio::test]
    async fn test_from_path_reads_metadata_and_guesses_mime() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.JPG");
        fs::write(&path, [0xff, 0xd8, 0xff]).unwrap();

        let upload = UploadedImage::from_path(&path).await.unwrap();
        assert_eq!(upload.name(), "photo.JPG");
        assert_eq!(upload.mime(), "image/jpeg");
        assert_eq!(upload.size(), 3);
        assert_eq!(upload.read().await.unwrap(), vec![0xff, 0xd8, 0xff]);
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(UploadedImage::from_path(dir.path().join("nope.png")).await.is_err());
    }

    #[tokio::test]
    async fn test_from_parts_is_lazy() {
        let upload = UploadedImage::from_parts("ghost.png", "image/png", 10, "/nonexistent/ghost.png");
        assert_eq!(upload.size(), 10);
        assert!(upload.read().await.is_err());
    }
}
