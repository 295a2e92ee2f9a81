//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::unique_violation_or;
use common::{AppError, AppResult};
use domain::{User, UserRole};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Emails are matched exactly; callers normalize case.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Users for the given ids, in no particular order. Unknown ids are skipped.
    async fn find_many(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>>;

    async fn list_by_role(&self, role: UserRole) -> AppResult<Vec<User>>;

    /// Insert a new user. A taken email is `Conflict("User")`.
    async fn create(&self, user: User) -> AppResult<User>;

    async fn update(&self, user: User) -> AppResult<User>;
}

/// SeaORM-backed user store
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::try_from).transpose()?)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::try_from).transpose()?)
    }

    async fn find_many(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = UserEntity::find()
            .filter(user::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models
            .into_iter()
            .map(User::try_from)
            .collect::<Result<_, _>>()?)
    }

    async fn list_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .filter(user::Column::Role.eq(role.as_str()))
            .order_by_asc(user::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models
            .into_iter()
            .map(User::try_from)
            .collect::<Result<_, _>>()?)
    }

    async fn create(&self, user: User) -> AppResult<User> {
        let active_model = ActiveModel::try_from(&user)?;

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| unique_violation_or(e, || AppError::conflict("User")))?;
        Ok(User::try_from(model)?)
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let active_model = ActiveModel::try_from(&user)?;

        let model = active_model.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::try_from(model)?)
    }
}
