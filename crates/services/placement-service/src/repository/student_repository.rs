//! Student profile repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::student_profile::{self, ActiveModel, Entity as StudentProfileEntity};
use common::{AppError, AppResult};
use domain::StudentProfile;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Student profile repository trait for dependency injection.
///
/// Saves are whole-document and last-write-wins.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait StudentProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<StudentProfile>>;

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<StudentProfile>>;

    /// Profiles for the given ids, in no particular order.
    async fn find_many(&self, ids: Vec<Uuid>) -> AppResult<Vec<StudentProfile>>;

    async fn list(&self) -> AppResult<Vec<StudentProfile>>;

    async fn create(&self, profile: StudentProfile) -> AppResult<StudentProfile>;

    async fn update(&self, profile: StudentProfile) -> AppResult<StudentProfile>;
}

/// SeaORM-backed student profile store
pub struct StudentProfileStore {
    db: DatabaseConnection,
}

impl StudentProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentProfileRepository for StudentProfileStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<StudentProfile>> {
        let result = StudentProfileEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(StudentProfile::try_from).transpose()?)
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<StudentProfile>> {
        let result = StudentProfileEntity::find()
            .filter(student_profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(StudentProfile::try_from).transpose()?)
    }

    async fn find_many(&self, ids: Vec<Uuid>) -> AppResult<Vec<StudentProfile>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = StudentProfileEntity::find()
            .filter(student_profile::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models
            .into_iter()
            .map(StudentProfile::try_from)
            .collect::<Result<_, _>>()?)
    }

    async fn list(&self) -> AppResult<Vec<StudentProfile>> {
        let models = StudentProfileEntity::find()
            .order_by_asc(student_profile::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models
            .into_iter()
            .map(StudentProfile::try_from)
            .collect::<Result<_, _>>()?)
    }

    async fn create(&self, profile: StudentProfile) -> AppResult<StudentProfile> {
        let model = ActiveModel::try_from(&profile)?
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(StudentProfile::try_from(model)?)
    }

    async fn update(&self, profile: StudentProfile) -> AppResult<StudentProfile> {
        let model = ActiveModel::try_from(&profile)?
            .update(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(StudentProfile::try_from(model)?)
    }
}
