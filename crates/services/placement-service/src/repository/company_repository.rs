//! Company profile repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::company_profile::{self, ActiveModel, Entity as CompanyProfileEntity};
use common::{AppError, AppResult};
use domain::CompanyProfile;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Company profile repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CompanyProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CompanyProfile>>;

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<CompanyProfile>>;

    async fn find_many(&self, ids: Vec<Uuid>) -> AppResult<Vec<CompanyProfile>>;

    async fn list(&self) -> AppResult<Vec<CompanyProfile>>;

    async fn create(&self, profile: CompanyProfile) -> AppResult<CompanyProfile>;

    async fn update(&self, profile: CompanyProfile) -> AppResult<CompanyProfile>;
}

/// SeaORM-backed company profile store
pub struct CompanyProfileStore {
    db: DatabaseConnection,
}

impl CompanyProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CompanyProfileRepository for CompanyProfileStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CompanyProfile>> {
        let result = CompanyProfileEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(CompanyProfile::try_from).transpose()?)
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<CompanyProfile>> {
        let result = CompanyProfileEntity::find()
            .filter(company_profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(CompanyProfile::try_from).transpose()?)
    }

    async fn find_many(&self, ids: Vec<Uuid>) -> AppResult<Vec<CompanyProfile>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = CompanyProfileEntity::find()
            .filter(company_profile::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models
            .into_iter()
            .map(CompanyProfile::try_from)
            .collect::<Result<_, _>>()?)
    }

    async fn list(&self) -> AppResult<Vec<CompanyProfile>> {
        let models = CompanyProfileEntity::find()
            .order_by_asc(company_profile::Column::CompanyName)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models
            .into_iter()
            .map(CompanyProfile::try_from)
            .collect::<Result<_, _>>()?)
    }

    async fn create(&self, profile: CompanyProfile) -> AppResult<CompanyProfile> {
        let model = ActiveModel::try_from(&profile)?
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(CompanyProfile::try_from(model)?)
    }

    async fn update(&self, profile: CompanyProfile) -> AppResult<CompanyProfile> {
        let model = ActiveModel::try_from(&profile)?
            .update(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(CompanyProfile::try_from(model)?)
    }
}
