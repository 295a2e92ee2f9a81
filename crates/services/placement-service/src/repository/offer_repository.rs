//! Offer repository implementation.
//!
//! Offer writes that also touch the student profile run in one transaction.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use super::entities::offer::{self, ActiveModel, Entity as OfferEntity};
use super::entities::student_profile;
use super::unique_violation_or;
use common::{AppError, AppResult};
use domain::{DomainError, Offer, StudentProfile};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Offer repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OfferRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Offer>>;

    async fn find_by_job_and_student(
        &self,
        job_id: Uuid,
        student_id: Uuid,
    ) -> AppResult<Option<Offer>>;

    /// Newest first
    async fn list_by_company(&self, company_id: Uuid) -> AppResult<Vec<Offer>>;

    /// Newest first
    async fn list_by_student(&self, student_id: Uuid) -> AppResult<Vec<Offer>>;

    /// Insert the offer and save the student profile that links it, atomically.
    /// A second offer for the same (job, student) is `DuplicateOffer`.
    async fn create_and_link(&self, offer: Offer, student: StudentProfile) -> AppResult<Offer>;

    /// Save a responded offer, together with the student profile when the
    /// response changed it.
    async fn save_response(&self, offer: Offer, student: Option<StudentProfile>)
        -> AppResult<Offer>;
}

/// SeaORM-backed offer store
pub struct OfferStore {
    db: DatabaseConnection,
}

impl OfferStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Commit on success, roll back on error.
    async fn finish<T>(txn: DatabaseTransaction, result: Result<T, DbErr>) -> Result<T, DbErr> {
        match result {
            Ok(value) => {
                txn.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }
}

fn into_offers(models: Vec<offer::Model>) -> AppResult<Vec<Offer>> {
    Ok(models
        .into_iter()
        .map(Offer::try_from)
        .collect::<Result<_, _>>()?)
}

#[async_trait]
impl OfferRepository for OfferStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Offer>> {
        let result = OfferEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Offer::try_from).transpose()?)
    }

    async fn find_by_job_and_student(
        &self,
        job_id: Uuid,
        student_id: Uuid,
    ) -> AppResult<Option<Offer>> {
        let result = OfferEntity::find()
            .filter(offer::Column::JobId.eq(job_id))
            .filter(offer::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Offer::try_from).transpose()?)
    }

    async fn list_by_company(&self, company_id: Uuid) -> AppResult<Vec<Offer>> {
        let models = OfferEntity::find()
            .filter(offer::Column::CompanyId.eq(company_id))
            .order_by_desc(offer::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        into_offers(models)
    }

    async fn list_by_student(&self, student_id: Uuid) -> AppResult<Vec<Offer>> {
        let models = OfferEntity::find()
            .filter(offer::Column::StudentId.eq(student_id))
            .order_by_desc(offer::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        into_offers(models)
    }

    async fn create_and_link(&self, offer: Offer, student: StudentProfile) -> AppResult<Offer> {
        let offer_model = ActiveModel::try_from(&offer)?;
        let student_model = student_profile::ActiveModel::try_from(&student)?;

        let txn = self.db.begin().await.map_err(AppError::from)?;
        let result = async {
            let inserted = offer_model.insert(&txn).await?;
            student_model.update(&txn).await?;
            Ok::<_, DbErr>(inserted)
        }
        .await;

        let model = Self::finish(txn, result)
            .await
            .map_err(|e| unique_violation_or(e, || DomainError::DuplicateOffer.into()))?;
        Ok(Offer::try_from(model)?)
    }

    async fn save_response(
        &self,
        offer: Offer,
        student: Option<StudentProfile>,
    ) -> AppResult<Offer> {
        let offer_model = ActiveModel::try_from(&offer)?;
        let student_model = student
            .as_ref()
            .map(student_profile::ActiveModel::try_from)
            .transpose()?;

        let txn = self.db.begin().await.map_err(AppError::from)?;
        let result = async {
            let updated = offer_model.update(&txn).await?;
            if let Some(student_model) = student_model {
                student_model.update(&txn).await?;
            }
            Ok::<_, DbErr>(updated)
        }
        .await;

        let model = Self::finish(txn, result).await.map_err(AppError::from)?;
        Ok(Offer::try_from(model)?)
    }
}
