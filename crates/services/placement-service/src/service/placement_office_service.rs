//! Placement office service: the TPO's view over every student and company.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{
    placement_stats, CompanyContact, CompanyProfileView, PlacementStats, PlacementStatus,
    StudentIdentity, StudentProfile, StudentProfileView, User, UserRole,
};

use crate::repository::{CompanyProfileRepository, StudentProfileRepository, UserRepository};

/// Placement office service trait for dependency injection.
#[async_trait]
pub trait PlacementOfficeService: Send + Sync {
    async fn students(&self) -> AppResult<Vec<StudentProfileView>>;

    async fn student(&self, profile_id: Uuid) -> AppResult<StudentProfileView>;

    async fn companies(&self) -> AppResult<Vec<CompanyProfileView>>;

    async fn company(&self, profile_id: Uuid) -> AppResult<CompanyProfileView>;

    /// Manual placement override.
    async fn set_placement_status(
        &self,
        profile_id: Uuid,
        status: PlacementStatus,
    ) -> AppResult<StudentProfileView>;

    async fn statistics(&self) -> AppResult<PlacementStats>;
}

/// Repository-backed `PlacementOfficeService`
pub struct PlacementOffice {
    users: Arc<dyn UserRepository>,
    students: Arc<dyn StudentProfileRepository>,
    companies: Arc<dyn CompanyProfileRepository>,
}

impl PlacementOffice {
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

    async fn users_by_role(&self, role: UserRole) -> AppResult<HashMap<Uuid, User>> {
        Ok(self
            .users
            .list_by_role(role)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect())
    }

    async fn student_view(&self, profile: StudentProfile) -> AppResult<StudentProfileView> {
        let user = self.users.find_by_id(profile.user).await?;
        Ok(StudentProfileView {
            user_info: user.as_ref().map(StudentIdentity::from),
            profile,
        })
    }
}

#[async_trait]
impl PlacementOfficeService for PlacementOffice {
    async fn students(&self) -> AppResult<Vec<StudentProfileView>> {
        let users = self.users_by_role(UserRole::Student).await?;
        Ok(self
            .students
            .list()
            .await?
            .into_iter()
            .map(|profile| StudentProfileView {
                user_info: users.get(&profile.user).map(StudentIdentity::from),
                profile,
            })
            .collect())
    }

    async fn student(&self, profile_id: Uuid) -> AppResult<StudentProfileView> {
        let profile = self
            .students
            .find_by_id(profile_id)
            .await?
            .ok_or_not_found("Student profile")?;
        self.student_view(profile).await
    }

    async fn companies(&self) -> AppResult<Vec<CompanyProfileView>> {
        let users = self.users_by_role(UserRole::Company).await?;
        Ok(self
            .companies
            .list()
            .await?
            .into_iter()
            .map(|profile| CompanyProfileView {
                user_info: users.get(&profile.user).map(CompanyContact::from),
                profile,
            })
            .collect())
    }

    async fn company(&self, profile_id: Uuid) -> AppResult<CompanyProfileView> {
        let profile = self
            .companies
            .find_by_id(profile_id)
            .await?
            .ok_or_not_found("Company profile")?;
        let user = self.users.find_by_id(profile.user).await?;
        Ok(CompanyProfileView {
            user_info: user.as_ref().map(CompanyContact::from),
            profile,
        })
    }

    async fn set_placement_status(
        &self,
        profile_id: Uuid,
        status: PlacementStatus,
    ) -> AppResult<StudentProfileView> {
        let mut profile = self
            .students
            .find_by_id(profile_id)
            .await?
            .ok_or_not_found("Student profile")?;
        profile.set_placement_status(status, Utc::now());
        let profile = self.students.update(profile).await?;

        tracing::info!(student_id = %profile_id, status = ?status, "Placement status overridden");
        self.student_view(profile).await
    }

    async fn statistics(&self) -> AppResult<PlacementStats> {
        let users = self.users_by_role(UserRole::Student).await?;
        let profiles = self.students.list().await?;
        Ok(placement_stats(profiles.iter().map(|profile| {
            let branch = users
                .get(&profile.user)
                .and_then(|user| user.details.branch());
            (profile, branch)
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        MockCompanyProfileRepository, MockStudentProfileRepository, MockUserRepository,
    };
    use crate::service::fixtures;
    use std::collections::BTreeMap;

    fn office(
        users: MockUserRepository,
        students: MockStudentProfileRepository,
        companies: MockCompanyProfileRepository,
    ) -> PlacementOffice {
        PlacementOffice::new(Arc::new(users), Arc::new(students), Arc::new(companies))
    }

    #[tokio::test]
    async fn test_statistics_by_branch() {
        let (asha, ravi, mira) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let now = Utc::now();

        let mut placed_cse = fixtures::student(asha);
        placed_cse.link_offer(Uuid::new_v4(), now);
        placed_cse.mark_placed(now);
        let mut placed_ece = fixtures::student(ravi);
        placed_ece.link_offer(Uuid::new_v4(), now);
        placed_ece.link_offer(Uuid::new_v4(), now);
        placed_ece.mark_placed(now);
        let unplaced = fixtures::student(mira);

        let mut users = MockUserRepository::new();
        users.expect_list_by_role().returning(move |_| {
            Ok(vec![
                fixtures::student_user(asha, "Asha", "CSE"),
                fixtures::student_user(ravi, "Ravi", "ECE"),
                fixtures::student_user(mira, "Mira", "CSE"),
            ])
        });
        let mut students = MockStudentProfileRepository::new();
        let all = vec![placed_cse, placed_ece, unplaced];
        students.expect_list().returning(move || Ok(all.clone()));

        let stats = office(users, students, MockCompanyProfileRepository::new())
            .statistics()
            .await
            .unwrap();

        assert_eq!(stats.total_students, 3);
        assert_eq!(stats.placed_students, 2);
        assert_eq!(stats.placement_percentage, 66.67);
        assert_eq!(stats.offer_stats.with_multiple_offers, 1);
        assert_eq!(
            stats.branch_wise_stats,
            BTreeMap::from([("CSE".to_string(), 1), ("ECE".to_string(), 1)])
        );
    }

    #[tokio::test]
    async fn test_statistics_without_students() {
        let mut users = MockUserRepository::new();
        users.expect_list_by_role().returning(|_| Ok(Vec::new()));
        let mut students = MockStudentProfileRepository::new();
        students.expect_list().returning(|| Ok(Vec::new()));

        let stats = office(users, students, MockCompanyProfileRepository::new())
            .statistics()
            .await
            .unwrap();
        assert_eq!(stats.placement_percentage, 0.0);
    }

    #[tokio::test]
    async fn test_manual_override() {
        let user_id = Uuid::new_v4();
        let mut profile = fixtures::student(user_id);
        profile.mark_placed(Utc::now());
        let profile_id = profile.id;

        let mut students = MockStudentProfileRepository::new();
        students
            .expect_find_by_id()
            .returning(move |_| Ok(Some(profile.clone())));
        students.expect_update().returning(|p| Ok(p));
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(fixtures::student_user(id, "Asha", "CSE"))));

        let view = office(users, students, MockCompanyProfileRepository::new())
            .set_placement_status(profile_id, PlacementStatus::NotPlaced)
            .await
            .unwrap();
        assert_eq!(view.profile.placement_status, PlacementStatus::NotPlaced);
        assert_eq!(view.user_info.and_then(|u| u.branch), Some("CSE".to_string()));
    }

    #[tokio::test]
    async fn test_company_join() {
        let user_id = Uuid::new_v4();
        let mut companies = MockCompanyProfileRepository::new();
        companies
            .expect_list()
            .returning(move || Ok(vec![fixtures::company(user_id)]));
        let mut users = MockUserRepository::new();
        users
            .expect_list_by_role()
            .withf(|role| *role == UserRole::Company)
            .returning(move |_| Ok(vec![fixtures::company_user(user_id)]));

        let views = office(users, MockStudentProfileRepository::new(), companies)
            .companies()
            .await
            .unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(
            views[0].user_info.as_ref().and_then(|c| c.hr_name.as_deref()),
            Some("Ravi")
        );
    }

    #[tokio::test]
    async fn test_missing_student() {
        let mut students = MockStudentProfileRepository::new();
        students.expect_find_by_id().returning(|_| Ok(None));

        let err = office(
            MockUserRepository::new(),
            students,
            MockCompanyProfileRepository::new(),
        )
        .student(Uuid::new_v4())
        .await
        .unwrap_err();
        assert_eq!(err.user_message(), "Student profile not found");
    }
}
