//! Resume repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::resume::{self, ActiveModel, Entity as ResumeEntity};
use common::{AppError, AppResult};
use domain::Resume;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Resume repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Resume>>;

    /// A student's resumes, most recently edited first.
    async fn list_by_student(&self, student_id: Uuid) -> AppResult<Vec<Resume>>;

    async fn create(&self, resume: Resume) -> AppResult<Resume>;

    async fn update(&self, resume: Resume) -> AppResult<Resume>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed resume store
pub struct ResumeStore {
    db: DatabaseConnection,
}

impl ResumeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResumeRepository for ResumeStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Resume>> {
        let result = ResumeEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Resume::try_from).transpose()?)
    }

    async fn list_by_student(&self, student_id: Uuid) -> AppResult<Vec<Resume>> {
        let models = ResumeEntity::find()
            .filter(resume::Column::StudentId.eq(student_id))
            .order_by_desc(resume::Column::UpdatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models
            .into_iter()
            .map(Resume::try_from)
            .collect::<Result<_, _>>()?)
    }

    async fn create(&self, resume: Resume) -> AppResult<Resume> {
        let model = ActiveModel::try_from(&resume)?
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(Resume::try_from(model)?)
    }

    async fn update(&self, resume: Resume) -> AppResult<Resume> {
        let model = ActiveModel::try_from(&resume)?
            .update(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(Resume::try_from(model)?)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = ResumeEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Resume"));
        }

        Ok(())
    }
}
