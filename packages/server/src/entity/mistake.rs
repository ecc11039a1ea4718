use common::storage::PhotoRole;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mistake")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Path of the compressed (gallery) photo.
    pub photo_path: String,

    /// Path of the full-quality photo.
    pub original_photo_path: String,

    /// Millisecond precision, never updated.
    #[sea_orm(indexed)]
    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Stored path of the given photo variant.
    pub fn path_for(&self, role: PhotoRole) -> &str {
        match role {
            PhotoRole::Compressed => &self.photo_path,
            PhotoRole::Original => &self.original_photo_path,
        }
    }
}
