use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tracing::debug;

use super::error::StorageError;
use super::payload::decode_image_payload;
use super::photo::{PhotoRole, PhotoStem};
use super::traits::{PhotoStore, SavedPhotos};

/// Filesystem-backed photo store.
///
/// Photos live in one flat directory:
/// `{base_path}/{yyyyMMddHHmmss}_{random}_{compressed|original}{ext}`.
/// Writes are staged in `{base_path}/.tmp` and renamed into place, so a
/// photo path never points at a partially written file.
pub struct FilesystemPhotoStore {
    base_path: PathBuf,
    max_size: u64,
}

impl FilesystemPhotoStore {
    /// Create a new filesystem photo store.
    pub async fn new(base_path: PathBuf, max_size: u64) -> Result<Self, StorageError> {
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self {
            base_path,
            max_size,
        })
    }

    /// Directory holding the photo files.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn temp_dir(&self) -> PathBuf {
        self.base_path.join(".tmp")
    }

    fn check_size(&self, data: &[u8]) -> Result<(), StorageError> {
        let actual = data.len() as u64;
        if actual > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual,
                limit: self.max_size,
            });
        }
        Ok(())
    }

    /// Write `data` under `file_name` via a temp file and return the final path.
    async fn write_photo(&self, file_name: &str, data: &[u8]) -> Result<PathBuf, StorageError> {
        // Recreated here too in case the directory was removed after startup.
        fs::create_dir_all(self.temp_dir()).await?;

        let temp_path = self.temp_dir().join(uuid::Uuid::new_v4().to_string());
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        let photo_path = self.base_path.join(file_name);
        if let Err(e) = fs::rename(&temp_path, &photo_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(photo_path)
    }
}

#[async_trait]
impl PhotoStore for FilesystemPhotoStore {
    async fn save(
        &self,
        compressed: &str,
        original: &str,
        suggested_name: &str,
    ) -> Result<SavedPhotos, StorageError> {
        let compressed = decode_image_payload(compressed)?;
        let original = decode_image_payload(original)?;
        self.check_size(&compressed)?;
        self.check_size(&original)?;

        let stem = PhotoStem::new(Utc::now(), suggested_name);

        let compressed_path = self
            .write_photo(&stem.file_name(PhotoRole::Compressed), &compressed)
            .await?;

        let original_path = match self
            .write_photo(&stem.file_name(PhotoRole::Original), &original)
            .await
        {
            Ok(path) => path,
            Err(e) => {
                // Best effort.
                let _ = fs::remove_file(&compressed_path).await;
                return Err(e);
            }
        };

        debug!(
            compressed = %compressed_path.display(),
            original = %original_path.display(),
            "Photos saved"
        );

        Ok(SavedPhotos {
            compressed: compressed_path.to_string_lossy().into_owned(),
            original: original_path.to_string_lossy().into_owned(),
        })
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        match fs::read(path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        Ok(fs::try_exists(path).await?)
    }

    async fn delete(&self, path: &str) -> Result<bool, StorageError> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
