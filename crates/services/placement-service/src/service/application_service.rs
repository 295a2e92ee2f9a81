//! Application service: applying to jobs, exam scheduling and the student
//! job search.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    derive_upcoming_exams, search_available_jobs, ApplicationUpdate, CompanySummary, ExamListing, JobListing, JobPage,
    JobSearchQuery, StudentEligibility, StudentProfile, UserRole,
};

use super::{distinct, Actor};
use crate::repository::{
    CompanyProfileRepository, JobRepository, StudentProfileRepository, UserRepository,
};

/// Application service trait for dependency injection.
#[async_trait]
pub trait ApplicationService: Send + Sync {
    /// Apply the student user to a job. Returns the saved profile.
    async fn apply(&self, user_id: Uuid, job_id: Uuid) -> AppResult<StudentProfile>;

    /// The student's upcoming exams, soonest first.
    async fn upcoming_exams(&self, user_id: Uuid) -> AppResult<Vec<ExamListing>>;

    /// Change an application's status or exam schedule.
    ///
    /// A student acts on their own profile; a TPO must name the target
    /// profile with `student_profile_id`.
    async fn update_application(
        &self,
        actor: Actor,
        application_id: Uuid,
        student_profile_id: Option<Uuid>,
        update: ApplicationUpdate,
    ) -> AppResult<StudentProfile>;

    /// Open jobs the student is eligible for and has not applied to.
    async fn available_jobs(&self, user_id: Uuid, query: JobSearchQuery) -> AppResult<JobPage>;
}

/// Repository-backed `ApplicationService`
pub struct ApplicationDesk {
    users: Arc<dyn UserRepository>,
    students: Arc<dyn StudentProfileRepository>,
    companies: Arc<dyn CompanyProfileRepository>,
    jobs: Arc<dyn JobRepository>,
}

impl ApplicationDesk {
    pub fn new(
        users: Arc<dyn UserRepository>,
        students: Arc<dyn StudentProfileRepository>,
        companies: Arc<dyn CompanyProfileRepository>,
        jobs: Arc<dyn JobRepository>,
    ) -> Self {
        Self {
            users,
            students,
            companies,
            jobs,
        }
    }

    async fn profile_of(&self, user_id: Uuid) -> AppResult<StudentProfile> {
        self.students
            .find_by_user(user_id)
            .await?
            .ok_or_not_found("Student profile")
    }

    /// Company id to summary for every company in `ids`.
    async fn company_summaries(
        &self,
        ids: Vec<Uuid>,
    ) -> AppResult<HashMap<Uuid, CompanySummary>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let companies = self.companies.find_many(ids).await?;
        Ok(companies
            .iter()
            .map(|company| (company.id, CompanySummary::from(company)))
            .collect())
    }
}

#[async_trait]
impl ApplicationService for ApplicationDesk {
    async fn apply(&self, user_id: Uuid, job_id: Uuid) -> AppResult<StudentProfile> {
        let mut profile = self.profile_of(user_id).await?;
        self.jobs.find_by_id(job_id).await?.ok_or_not_found("Job")?;

        let application_id = profile.apply(Uuid::new_v4(), job_id, Utc::now())?.id;
        let profile = self.students.update(profile).await?;

        tracing::info!(
            application_id = %application_id,
            job_id = %job_id,
            student_id = %profile.id,
            "Application submitted"
        );
        Ok(profile)
    }

    async fn upcoming_exams(&self, user_id: Uuid) -> AppResult<Vec<ExamListing>> {
        let profile = self.profile_of(user_id).await?;
        // The stored list goes stale as exam dates pass
        let upcoming = derive_upcoming_exams(&profile.applied_jobs, Utc::now());
        if upcoming.is_empty() {
            return Ok(Vec::new());
        }

        let jobs = self
            .jobs
            .find_many(distinct(upcoming.iter().map(|exam| exam.job)))
            .await?;
        let companies = self
            .company_summaries(distinct(jobs.iter().map(|job| job.company)))
            .await?;
        let jobs: HashMap<Uuid, _> = jobs.into_iter().map(|job| (job.id, job)).collect();

        Ok(upcoming
            .into_iter()
            .map(|exam| {
                let job = jobs.get(&exam.job);
                ExamListing {
                    job_title: job.map(|job| job.title.clone()),
                    company_name: job
                        .and_then(|job| companies.get(&job.company))
                        .map(|company| company.company_name.clone()),
                    exam,
                }
            })
            .collect())
    }

    async fn update_application(
        &self,
        actor: Actor,
        application_id: Uuid,
        student_profile_id: Option<Uuid>,
        update: ApplicationUpdate,
    ) -> AppResult<StudentProfile> {
        let mut profile = match actor.role {
            UserRole::Student => self.profile_of(actor.id).await?,
            UserRole::Tpo => {
                let target = student_profile_id
                    .ok_or_else(|| AppError::validation("Student ID is required"))?;
                self.students
                    .find_by_id(target)
                    .await?
                    .ok_or_not_found("Student profile")?
            }
            UserRole::Company => {
                tracing::warn!(user_id = %actor.id, "Company attempted to update an application");
                return Err(AppError::Forbidden);
            }
        };

        let status = profile
            .update_application(application_id, update, Utc::now())?
            .status;
        let profile = self.students.update(profile).await?;

        tracing::info!(
            application_id = %application_id,
            student_id = %profile.id,
            status = ?status,
            "Application updated"
        );
        Ok(profile)
    }

    async fn available_jobs(&self, user_id: Uuid, query: JobSearchQuery) -> AppResult<JobPage> {
        let profile = self.profile_of(user_id).await?;
        let user = self.users.find_by_id(user_id).await?;
        let eligibility =
            StudentEligibility::from_profile(user.as_ref().map(|u| &u.details), &profile);

        let now = Utc::now();
        let open = self.jobs.list_open(now).await?;
        let companies = self
            .company_summaries(distinct(open.iter().map(|job| job.company)))
            .await?;
        let candidates = open
            .into_iter()
            .map(|job| JobListing {
                company_info: companies.get(&job.company).cloned(),
                job,
            })
            .collect();

        Ok(search_available_jobs(candidates, &profile, &eligibility, &query, now))
    }
}
