use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::mistake;
use crate::error::AppError;
use crate::models::shared::serialize_utc_millis;

/// Request body for recording a new mistake.
///
/// Absent fields default to empty strings and are rejected by validation.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateMistakeRequest {
    /// What went wrong.
    #[schema(example = "Left the stove on")]
    pub description: String,
    /// Compressed photo, base64 or a `data:` URL.
    #[schema(example = "data:image/jpeg;base64,/9j/4AAQ...")]
    pub photo: String,
    /// Full-quality photo, base64 or a `data:` URL.
    #[schema(example = "/9j/4AAQ...")]
    pub original_photo: String,
}

/// Response DTO for a single mistake.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MistakeResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Left the stove on")]
    pub description: String,
    #[schema(example = "App_Data/photos/20240101120000_0f3c..._compressed.jpg")]
    pub photo_path: String,
    #[schema(example = "App_Data/photos/20240101120000_0f3c..._original.jpg")]
    pub original_photo_path: String,
    #[serde(serialize_with = "serialize_utc_millis")]
    #[schema(value_type = String, example = "2024-01-01T12:00:00.000Z")]
    pub created_at: DateTime<Utc>,
}

impl From<mistake::Model> for MistakeResponse {
    fn from(model: mistake::Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
            photo_path: model.photo_path,
            original_photo_path: model.original_photo_path,
            created_at: model.created_at,
        }
    }
}

/// Reject a create request with any empty field, naming every missing one.
pub fn validate_create_mistake(req: &CreateMistakeRequest) -> Result<(), AppError> {
    let missing: Vec<&str> = [
        ("description", req.description.trim().is_empty()),
        ("photo", req.photo.trim().is_empty()),
        ("originalPhoto", req.original_photo.trim().is_empty()),
    ]
    .into_iter()
    .filter_map(|(name, empty)| empty.then_some(name))
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}
