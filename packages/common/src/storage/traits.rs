use async_trait::async_trait;

use super::error::StorageError;

/// Locations of the two files written for one mistake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPhotos {
    pub compressed: String,
    pub original: String,
}

/// Storage for the compressed/original image pair of each mistake.
///
/// Photos are addressed by the path returned from [`PhotoStore::save`].
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Decode both transport-encoded payloads and write them to uniquely
    /// named files. Nothing is left on disk when either payload is rejected.
    async fn save(
        &self,
        compressed: &str,
        original: &str,
        suggested_name: &str,
    ) -> Result<SavedPhotos, StorageError>;

    /// Read all bytes of a stored photo.
    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Check whether a photo file exists.
    async fn exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Delete a photo file.
    ///
    /// Returns `true` if the file was deleted, `false` if it did not exist.
    async fn delete(&self, path: &str) -> Result<bool, StorageError>;

    /// Delete both variants. The first failure is returned as is; a file that
    /// was already removed is not rolled back.
    async fn delete_both(&self, compressed: &str, original: &str) -> Result<(), StorageError> {
        self.delete(compressed).await?;
        self.delete(original).await?;
        Ok(())
    }
}
