//! Announcement repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};
use uuid::Uuid;

use super::entities::announcement::{self, ActiveModel, Entity as AnnouncementEntity};
use common::{AppError, AppResult};
use domain::Announcement;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Announcement repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Announcement>>;

    /// Every announcement, newest first. Audience filtering happens above.
    async fn list(&self) -> AppResult<Vec<Announcement>>;

    async fn create(&self, announcement: Announcement) -> AppResult<Announcement>;

    async fn update(&self, announcement: Announcement) -> AppResult<Announcement>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed announcement store
pub struct AnnouncementStore {
    db: DatabaseConnection,
}

impl AnnouncementStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AnnouncementRepository for AnnouncementStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Announcement>> {
        let result = AnnouncementEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Announcement::try_from).transpose()?)
    }

    async fn list(&self) -> AppResult<Vec<Announcement>> {
        let models = AnnouncementEntity::find()
            .order_by_desc(announcement::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models
            .into_iter()
            .map(Announcement::try_from)
            .collect::<Result<_, _>>()?)
    }

    async fn create(&self, announcement: Announcement) -> AppResult<Announcement> {
        let model = ActiveModel::try_from(&announcement)?
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(Announcement::try_from(model)?)
    }

    async fn update(&self, announcement: Announcement) -> AppResult<Announcement> {
        let model = ActiveModel::try_from(&announcement)?
            .update(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(Announcement::try_from(model)?)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = AnnouncementEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Announcement"));
        }

        Ok(())
    }
}
