use chrono::{DateTime, SubsecRound, Utc};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

use crate::entity::mistake;

/// Fields supplied when recording a mistake; id and timestamp are assigned here.
#[derive(Debug, Clone)]
pub struct NewMistake {
    pub description: String,
    pub photo_path: String,
    pub original_photo_path: String,
}

/// Result of deleting a mistake row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Record store for mistakes.
pub struct MistakeService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> MistakeService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// All mistakes, newest first. Equal timestamps fall back to id, highest first.
    pub async fn list(&self) -> Result<Vec<mistake::Model>, DbErr> {
        mistake::Entity::find()
            .order_by_desc(mistake::Column::CreatedAt)
            .order_by_desc(mistake::Column::Id)
            .all(self.conn)
            .await
    }

    pub async fn get(&self, id: i32) -> Result<Option<mistake::Model>, DbErr> {
        mistake::Entity::find_by_id(id).one(self.conn).await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        mistake::Entity::find().count(self.conn).await
    }

    /// Insert a mistake stamped with the current time.
    pub async fn create(&self, new: NewMistake) -> Result<mistake::Model, DbErr> {
        self.create_at(new, Utc::now()).await
    }

    /// Insert a mistake with an explicit creation time.
    ///
    /// The timestamp is truncated to milliseconds, the precision exposed by the API.
    pub async fn create_at(
        &self,
        new: NewMistake,
        created_at: DateTime<Utc>,
    ) -> Result<mistake::Model, DbErr> {
        let model = mistake::ActiveModel {
            description: Set(new.description),
            photo_path: Set(new.photo_path),
            original_photo_path: Set(new.original_photo_path),
            created_at: Set(created_at.trunc_subsecs(3)),
            ..Default::default()
        };

        model.insert(self.conn).await
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteOutcome, DbErr> {
        let result = mistake::Entity::delete_by_id(id).exec(self.conn).await?;
        Ok(if result.rows_affected == 0 {
            DeleteOutcome::NotFound
        } else {
            DeleteOutcome::Deleted
        })
    }
}
