//! Create and delete span two stores: the photo files and the `mistake` row.
//!
//! Both run as two-phase sequences where the row write is the committing step.
//! A failed create removes the photos it just wrote; a failed photo deletion
//! leaves the row in place so the delete can be retried.

use chrono::Utc;
use common::storage::PhotoStore;
use sea_orm::ConnectionTrait;
use tracing::{info, warn};

use super::service::{DeleteOutcome, MistakeService, NewMistake};
use crate::entity::mistake;
use crate::error::AppError;
use crate::models::mistake::{CreateMistakeRequest, validate_create_mistake};

/// Save both photos, then insert the row that references them.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    photos: &dyn PhotoStore,
    request: CreateMistakeRequest,
) -> Result<mistake::Model, AppError> {
    validate_create_mistake(&request)?;

    let suggested_name = format!("mistake_{}.jpg", Utc::now().format("%Y%m%d%H%M%S"));
    let saved = photos
        .save(&request.photo, &request.original_photo, &suggested_name)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Storage(msg) => AppError::Storage(format!("Error saving photos: {msg}")),
            other => other,
        })?;

    let new = NewMistake {
        description: request.description.trim().to_string(),
        photo_path: saved.compressed.clone(),
        original_photo_path: saved.original.clone(),
    };

    match MistakeService::new(db).create(new).await {
        Ok(model) => {
            info!(id = model.id, "Mistake recorded");
            Ok(model)
        }
        Err(e) => {
            if let Err(cleanup) = photos.delete_both(&saved.compressed, &saved.original).await {
                warn!(
                    compressed = %saved.compressed,
                    original = %saved.original,
                    "Failed to remove photos after insert failure: {cleanup}"
                );
            }
            Err(AppError::Storage(format!("Error creating mistake: {e}")))
        }
    }
}

/// Remove both photos, then the row.
pub async fn delete<C: ConnectionTrait>(
    db: &C,
    photos: &dyn PhotoStore,
    id: i32,
) -> Result<(), AppError> {
    let service = MistakeService::new(db);
    let mistake = service
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Mistake not found".into()))?;

    photos
        .delete_both(&mistake.photo_path, &mistake.original_photo_path)
        .await
        .map_err(|e| AppError::Storage(format!("Error deleting photos: {e}")))?;

    match service.delete(id).await? {
        DeleteOutcome::Deleted => {
            info!(id, "Mistake deleted");
            Ok(())
        }
        DeleteOutcome::NotFound => Err(AppError::NotFound("Mistake not found".into())),
    }
}
