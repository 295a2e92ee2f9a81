//! Profile service: own profiles for each role and the company-facing
//! student directory.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{
    CompanyContact, CompanyProfileUpdate, CompanyProfileView, PublicStudentProfile,
    StudentIdentity, StudentProfileUpdate, StudentProfileView, StudentSearchQuery, User,
    UserResponse,
};

use crate::repository::{CompanyProfileRepository, StudentProfileRepository, UserRepository};

/// Profile service trait for dependency injection.
#[async_trait]
pub trait ProfileService: Send + Sync {
    async fn student_profile(&self, user_id: Uuid) -> AppResult<StudentProfileView>;

    async fn update_student_profile(
        &self,
        user_id: Uuid,
        update: StudentProfileUpdate,
    ) -> AppResult<StudentProfileView>;

    async fn company_profile(&self, user_id: Uuid) -> AppResult<CompanyProfileView>;

    async fn update_company_profile(
        &self,
        user_id: Uuid,
        update: CompanyProfileUpdate,
    ) -> AppResult<CompanyProfileView>;

    /// Replace the HR contact stored on a company user.
    async fn update_hr_info(
        &self,
        user_id: Uuid,
        hr_name: Option<String>,
        contact_number: Option<String>,
    ) -> AppResult<UserResponse>;

    async fn tpo_profile(&self, user_id: Uuid) -> AppResult<UserResponse>;

    async fn update_tpo_profile(
        &self,
        user_id: Uuid,
        institute_name: Option<String>,
        contact_number: Option<String>,
    ) -> AppResult<UserResponse>;

    /// Students matching every supplied filter.
    async fn search_students(&self, query: StudentSearchQuery)
        -> AppResult<Vec<PublicStudentProfile>>;

    async fn public_student(&self, profile_id: Uuid) -> AppResult<PublicStudentProfile>;
}

/// Repository-backed `ProfileService`
pub struct ProfileManager {
    users: Arc<dyn UserRepository>,
    students: Arc<dyn StudentProfileRepository>,
    companies: Arc<dyn CompanyProfileRepository>,
}

impl ProfileManager {
    pub fn new(
        users: Arc<dyn UserRepository>,
        students: Arc<dyn StudentProfileRepository>,
        companies: Arc<dyn CompanyProfileRepository>,
    ) -> Self {
        Self {
            users,
            students,
            companies,
        }
    }

    async fn user_by_id(&self, user_id: Uuid, entity: &str) -> AppResult<User> {
        self.users.find_by_id(user_id).await?.ok_or_not_found(entity)
    }
}

#[async_trait]
impl ProfileService for ProfileManager {
    async fn student_profile(&self, user_id: Uuid) -> AppResult<StudentProfileView> {
        let profile = self
            .students
            .find_by_user(user_id)
            .await?
            .ok_or_not_found("Profile")?;
        let user = self.users.find_by_id(user_id).await?;

        Ok(StudentProfileView {
            profile,
            user_info: user.as_ref().map(StudentIdentity::from),
        })
    }

    async fn update_student_profile(
        &self,
        user_id: Uuid,
        update: StudentProfileUpdate,
    ) -> AppResult<StudentProfileView> {
        let mut profile = self
            .students
            .find_by_user(user_id)
            .await?
            .ok_or_not_found("Profile")?;
        profile.apply_update(update, Utc::now());

        let profile = self.students.update(profile).await?;
        let user = self.users.find_by_id(user_id).await?;

        Ok(StudentProfileView {
            profile,
            user_info: user.as_ref().map(StudentIdentity::from),
        })
    }

    async fn company_profile(&self, user_id: Uuid) -> AppResult<CompanyProfileView> {
        let profile = self
            .companies
            .find_by_user(user_id)
            .await?
            .ok_or_not_found("Company profile")?;
        let user = self.users.find_by_id(user_id).await?;

        Ok(CompanyProfileView {
            profile,
            user_info: user.as_ref().map(CompanyContact::from),
        })
    }

    async fn update_company_profile(
        &self,
        user_id: Uuid,
        update: CompanyProfileUpdate,
    ) -> AppResult<CompanyProfileView> {
        let mut profile = self
            .companies
            .find_by_user(user_id)
            .await?
            .ok_or_not_found("Company profile")?;
        profile.apply_update(update, Utc::now())?;

        let profile = self.companies.update(profile).await?;
        let user = self.users.find_by_id(user_id).await?;

        Ok(CompanyProfileView {
            profile,
            user_info: user.as_ref().map(CompanyContact::from),
        })
    }

    async fn update_hr_info(
        &self,
        user_id: Uuid,
        hr_name: Option<String>,
        contact_number: Option<String>,
    ) -> AppResult<UserResponse> {
        let mut user = self.user_by_id(user_id, "User").await?;
        user.update_hr_info(hr_name, contact_number, Utc::now())?;

        Ok(self.users.update(user).await?.into())
    }

    async fn tpo_profile(&self, user_id: Uuid) -> AppResult<UserResponse> {
        let user = self.user_by_id(user_id, "TPO profile").await?;
        Ok(user.into())
    }

    async fn update_tpo_profile(
        &self,
        user_id: Uuid,
        institute_name: Option<String>,
        contact_number: Option<String>,
    ) -> AppResult<UserResponse> {
        let mut user = self.user_by_id(user_id, "TPO profile").await?;
        user.update_tpo_info(institute_name, contact_number, Utc::now())?;

        Ok(self.users.update(user).await?.into())
    }

    async fn search_students(
        &self,
        query: StudentSearchQuery,
    ) -> AppResult<Vec<PublicStudentProfile>> {
        let profiles = self.students.list().await?;
        let users: HashMap<Uuid, User> = self
            .users
            .find_many(profiles.iter().map(|p| p.user).collect())
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(profiles
            .into_iter()
            .filter_map(|profile| {
                let user = users.get(&profile.user);
                if !query.matches(user.map(|u| &u.details), &profile) {
                    return None;
                }
                let identity = user.map(StudentIdentity::from);
                Some(PublicStudentProfile::new(profile, identity))
            })
            .collect())
    }

    async fn public_student(&self, profile_id: Uuid) -> AppResult<PublicStudentProfile> {
        let profile = self
            .students
            .find_by_id(profile_id)
            .await?
            .ok_or_not_found("Student profile")?;
        let user = self.users.find_by_id(profile.user).await?;

        Ok(PublicStudentProfile::new(
            profile,
            user.as_ref().map(StudentIdentity::from),
        ))
    }
}
