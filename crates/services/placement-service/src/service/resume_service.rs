//! Resume service: a student's stored resume records.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{NewResume, Resume, ResumeUpdate, StudentProfile};

use crate::repository::{ResumeRepository, StudentProfileRepository};

/// Resume service trait for dependency injection.
///
/// Every operation acts for the student user `user_id`, who must own the
/// resume.
#[async_trait]
pub trait ResumeService: Send + Sync {
    async fn list(&self, user_id: Uuid) -> AppResult<Vec<Resume>>;

    async fn get(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<Resume>;

    async fn create(&self, user_id: Uuid, input: NewResume) -> AppResult<Resume>;

    async fn update(&self, user_id: Uuid, resume_id: Uuid, update: ResumeUpdate)
        -> AppResult<Resume>;

    async fn delete(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<()>;
}

/// Repository-backed `ResumeService`
pub struct ResumeManager {
    resumes: Arc<dyn ResumeRepository>,
    students: Arc<dyn StudentProfileRepository>,
}

impl ResumeManager {
    pub fn new(
        resumes: Arc<dyn ResumeRepository>,
        students: Arc<dyn StudentProfileRepository>,
    ) -> Self {
        Self { resumes, students }
    }

    async fn student_of(&self, user_id: Uuid) -> AppResult<StudentProfile> {
        self.students
            .find_by_user(user_id)
            .await?
            .ok_or_not_found("Student profile")
    }

    async fn owned(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<Resume> {
        let student = self.student_of(user_id).await?;
        let resume = self
            .resumes
            .find_by_id(resume_id)
            .await?
            .ok_or_not_found("Resume")?;
        resume.ensure_owned_by(student.id, "access this resume")?;
        Ok(resume)
    }
}

#[async_trait]
impl ResumeService for ResumeManager {
    async fn list(&self, user_id: Uuid) -> AppResult<Vec<Resume>> {
        let student = self.student_of(user_id).await?;
        self.resumes.list_by_student(student.id).await
    }

    async fn get(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<Resume> {
        self.owned(user_id, resume_id).await
    }

    async fn create(&self, user_id: Uuid, input: NewResume) -> AppResult<Resume> {
        let student = self.student_of(user_id).await?;
        let resume = Resume::create(Uuid::new_v4(), student.id, input, Utc::now())?;
        self.resumes.create(resume).await
    }

    async fn update(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        update: ResumeUpdate,
    ) -> AppResult<Resume> {
        let mut resume = self.owned(user_id, resume_id).await?;
        resume.apply_update(update, Utc::now());
        self.resumes.update(resume).await
    }

    async fn delete(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<()> {
        self.owned(user_id, resume_id).await?;
        self.resumes.delete(resume_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockResumeRepository, MockStudentProfileRepository};
    use crate::service::fixtures;
    use common::AppError;
    use domain::ResumeData;

    fn students_for(profile: StudentProfile) -> MockStudentProfileRepository {
        let mut students = MockStudentProfileRepository::new();
        students
            .expect_find_by_user()
            .returning(move |_| Ok(Some(profile.clone())));
        students
    }

    fn resume_of(student_id: Uuid) -> Resume {
        Resume::create(
            Uuid::new_v4(),
            student_id,
            NewResume {
                template: None,
                data: ResumeData::default(),
                version: "1".to_string(),
            },
            Utc::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_for_own_profile() {
        let user_id = Uuid::new_v4();
        let profile = fixtures::student(user_id);
        let profile_id = profile.id;

        let mut resumes = MockResumeRepository::new();
        resumes
            .expect_create()
            .withf(move |r| r.student == profile_id)
            .returning(|r| Ok(r));

        let resume = ResumeManager::new(Arc::new(resumes), Arc::new(students_for(profile)))
            .create(
                user_id,
                NewResume {
                    template: Some("modern".to_string()),
                    data: ResumeData {
                        career_objective: Some("Backend work".to_string()),
                        ..Default::default()
                    },
                    version: "2".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(resume.template, "modern");
    }

    #[tokio::test]
    async fn test_foreign_resume_hidden() {
        let user_id = Uuid::new_v4();
        let foreign = resume_of(Uuid::new_v4());
        let resume_id = foreign.id;

        let mut resumes = MockResumeRepository::new();
        resumes
            .expect_find_by_id()
            .returning(move |_| Ok(Some(foreign.clone())));
        resumes.expect_delete().never();

        let manager = ResumeManager::new(
            Arc::new(resumes),
            Arc::new(students_for(fixtures::student(user_id))),
        );
        let err = manager.delete(user_id, resume_id).await.unwrap_err();
        assert!(matches!(err, AppError::NotAuthorized(_)));
    }

    #[tokio::test]
    async fn test_update_keeps_template_when_blank() {
        let user_id = Uuid::new_v4();
        let profile = fixtures::student(user_id);
        let existing = resume_of(profile.id);
        let resume_id = existing.id;

        let mut resumes = MockResumeRepository::new();
        resumes
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        resumes.expect_update().returning(|r| Ok(r));

        let resume = ResumeManager::new(Arc::new(resumes), Arc::new(students_for(profile)))
            .update(
                user_id,
                resume_id,
                ResumeUpdate {
                    template: Some(" ".to_string()),
                    version: Some("3".to_string()),
                    data: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(resume.template, "classic");
        assert_eq!(resume.version, "3");
    }

    #[tokio::test]
    async fn test_missing_resume() {
        let user_id = Uuid::new_v4();
        let mut resumes = MockResumeRepository::new();
        resumes.expect_find_by_id().returning(|_| Ok(None));

        let err = ResumeManager::new(
            Arc::new(resumes),
            Arc::new(students_for(fixtures::student(user_id))),
        )
        .get(user_id, Uuid::new_v4())
        .await
        .unwrap_err();
        assert_eq!(err.user_message(), "Resume not found");
    }
}
