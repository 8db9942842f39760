// Disk-backed storage for uploaded images
// Files are written before the database record that references them;
// a failed database write after a successful file write leaves the
// file orphaned (accepted gap).

use chrono::Utc;
use rand::Rng;
use std::path::{Path, PathBuf};

/// Size cap for a single uploaded file (5 MB)
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Content types accepted for image uploads
const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

/// Errors raised while persisting an uploaded file
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    #[error("File exceeds the {MAX_UPLOAD_BYTES} byte limit")]
    TooLarge,

    #[error("Failed to write uploaded file: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes uploaded images into a flat directory with unique filenames
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_dir(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Persist one uploaded file and return the relative path stored on
    /// the owning record. The filename is the upload timestamp plus a
    /// random suffix, keeping the original extension.
    pub async fn save(
        &self,
        original_name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, UploadError> {
        let content_type = content_type.unwrap_or("");
        if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
            return Err(UploadError::InvalidFileType(content_type.to_string()));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge);
        }

        let filename = Self::unique_filename(original_name);
        let path = self.dir.join(&filename);
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!("Stored upload {} ({} bytes)", filename, bytes.len());
        Ok(format!("{}/{}", self.dir.display(), filename))
    }

    fn unique_filename(original_name: &str) -> String {
        let ext = Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("bin");
        let suffix: u32 = rand::thread_rng().gen();
        format!("{}-{:08x}.{}", Utc::now().timestamp_millis(), suffix, ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_keeps_extension() {
        let name = UploadStore::unique_filename("photo.png");
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn filename_without_extension_gets_fallback() {
        let name = UploadStore::unique_filename("photo");
        assert!(name.ends_with(".bin"));
    }

    #[test]
    fn filenames_are_unique() {
        let a = UploadStore::unique_filename("a.jpg");
        let b = UploadStore::unique_filename("a.jpg");
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn rejects_non_image_content_type() {
        let store = UploadStore::new(std::env::temp_dir().join("storefront-test-uploads"));
        store.ensure_dir().await.unwrap();
        let result = store.save("doc.pdf", Some("application/pdf"), b"%PDF").await;
        assert!(matches!(result, Err(UploadError::InvalidFileType(_))));
    }

    #[tokio::test]
    async fn stores_image_and_returns_relative_path() {
        let dir = std::env::temp_dir().join("storefront-test-uploads");
        let store = UploadStore::new(&dir);
        store.ensure_dir().await.unwrap();
        let path = store
            .save("photo.png", Some("image/png"), &[137, 80, 78, 71])
            .await
            .unwrap();
        assert!(path.contains(".png"));
        assert!(tokio::fs::metadata(&path).await.is_ok());
        tokio::fs::remove_file(&path).await.ok();
    }
}
