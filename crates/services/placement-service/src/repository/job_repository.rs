//! Job repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::enum_to_string;
use super::entities::job::{self, ActiveModel, Entity as JobEntity};
use common::{AppError, AppResult};
use domain::{Job, JobStatus};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Job repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Job>>;

    async fn find_many(&self, ids: Vec<Uuid>) -> AppResult<Vec<Job>>;

    /// A company's postings, newest first.
    async fn list_by_company(&self, company_id: Uuid) -> AppResult<Vec<Job>>;

    /// Open postings whose deadline is after `now`.
    async fn list_open(&self, now: DateTime<Utc>) -> AppResult<Vec<Job>>;

    async fn create(&self, job: Job) -> AppResult<Job>;

    async fn update(&self, job: Job) -> AppResult<Job>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed job store
pub struct JobStore {
    db: DatabaseConnection,
}

impl JobStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn into_jobs(models: Vec<job::Model>) -> AppResult<Vec<Job>> {
    Ok(models
        .into_iter()
        .map(Job::try_from)
        .collect::<Result<_, _>>()?)
}

#[async_trait]
impl JobRepository for JobStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Job>> {
        let result = JobEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Job::try_from).transpose()?)
    }

    async fn find_many(&self, ids: Vec<Uuid>) -> AppResult<Vec<Job>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = JobEntity::find()
            .filter(job::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        into_jobs(models)
    }

    async fn list_by_company(&self, company_id: Uuid) -> AppResult<Vec<Job>> {
        let models = JobEntity::find()
            .filter(job::Column::CompanyId.eq(company_id))
            .order_by_desc(job::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        into_jobs(models)
    }

    async fn list_open(&self, now: DateTime<Utc>) -> AppResult<Vec<Job>> {
        let models = JobEntity::find()
            .filter(job::Column::Status.eq(enum_to_string(&JobStatus::Open)?))
            .filter(job::Column::ApplicationDeadline.gt(now))
            .order_by_desc(job::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        into_jobs(models)
    }

    async fn create(&self, job: Job) -> AppResult<Job> {
        let model = ActiveModel::try_from(&job)?
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(Job::try_from(model)?)
    }

    async fn update(&self, job: Job) -> AppResult<Job> {
        let model = ActiveModel::try_from(&job)?
            .update(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(Job::try_from(model)?)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = JobEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Job"));
        }

        Ok(())
    }
}
