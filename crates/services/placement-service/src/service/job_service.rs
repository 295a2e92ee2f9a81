//! Job service: a company's postings and its dashboard.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{
    company_dashboard, filter_company_jobs, ApplicationStats, CompanyDashboard, CompanyJobFilter,
    CompanyJobPage, CompanyProfile, Job, JobUpdate, JobWithStats, NewJob,
};

use crate::repository::{
    CompanyProfileRepository, JobRepository, OfferRepository, StudentProfileRepository,
};

/// Job service trait for dependency injection.
///
/// Every operation acts on behalf of the company user `user_id`.
#[async_trait]
pub trait JobService: Send + Sync {
    async fn create_job(&self, user_id: Uuid, input: NewJob) -> AppResult<Job>;

    /// Newest first
    async fn company_jobs(&self, user_id: Uuid) -> AppResult<Vec<Job>>;

    /// Filtered, sorted page of the company's jobs with application counts.
    async fn filter_jobs(&self, user_id: Uuid, filter: CompanyJobFilter)
        -> AppResult<CompanyJobPage>;

    async fn update_job(&self, user_id: Uuid, job_id: Uuid, update: JobUpdate) -> AppResult<Job>;

    async fn delete_job(&self, user_id: Uuid, job_id: Uuid) -> AppResult<()>;

    async fn dashboard(&self, user_id: Uuid) -> AppResult<CompanyDashboard>;
}

/// Repository-backed `JobService`
pub struct JobBoard {
    companies: Arc<dyn CompanyProfileRepository>,
    jobs: Arc<dyn JobRepository>,
    students: Arc<dyn StudentProfileRepository>,
    offers: Arc<dyn OfferRepository>,
}

impl JobBoard {
    pub fn new(
        companies: Arc<dyn CompanyProfileRepository>,
        jobs: Arc<dyn JobRepository>,
        students: Arc<dyn StudentProfileRepository>,
        offers: Arc<dyn OfferRepository>,
    ) -> Self {
        Self {
            companies,
            jobs,
            students,
            offers,
        }
    }

    async fn company_of(&self, user_id: Uuid) -> AppResult<CompanyProfile> {
        self.companies
            .find_by_user(user_id)
            .await?
            .ok_or_not_found("Company profile")
    }

    /// Load a job and check the caller's company owns it.
    async fn owned_job(&self, user_id: Uuid, job_id: Uuid, action: &str) -> AppResult<Job> {
        let company = self.company_of(user_id).await?;
        let job = self.jobs.find_by_id(job_id).await?.ok_or_not_found("Job")?;
        job.ensure_owned_by(company.id, action)?;
        Ok(job)
    }
}

#[async_trait]
impl JobService for JobBoard {
    async fn create_job(&self, user_id: Uuid, input: NewJob) -> AppResult<Job> {
        let company = self.company_of(user_id).await?;
        let job = Job::create(Uuid::new_v4(), company.id, user_id, input, Utc::now())?;

        let job = self.jobs.create(job).await?;
        tracing::info!(job_id = %job.id, company_id = %company.id, "Job posted");
        Ok(job)
    }

    async fn company_jobs(&self, user_id: Uuid) -> AppResult<Vec<Job>> {
        let company = self.company_of(user_id).await?;
        self.jobs.list_by_company(company.id).await
    }

    async fn filter_jobs(
        &self,
        user_id: Uuid,
        filter: CompanyJobFilter,
    ) -> AppResult<CompanyJobPage> {
        let company = self.company_of(user_id).await?;
        let jobs = self.jobs.list_by_company(company.id).await?;
        let (page, pagination) = filter_company_jobs(jobs, &filter);

        let mut stats: HashMap<Uuid, ApplicationStats> =
            page.iter().map(|job| (job.id, ApplicationStats::default())).collect();
        if !stats.is_empty() {
            for profile in self.students.list().await? {
                for application in &profile.applied_jobs {
                    if let Some(counts) = stats.get_mut(&application.job) {
                        counts.record(application.status);
                    }
                }
            }
        }

        let jobs = page
            .into_iter()
            .map(|job| {
                let application_stats = stats.remove(&job.id).unwrap_or_default();
                JobWithStats {
                    job,
                    application_stats,
                }
            })
            .collect();

        Ok(CompanyJobPage { jobs, pagination })
    }

    async fn update_job(&self, user_id: Uuid, job_id: Uuid, update: JobUpdate) -> AppResult<Job> {
        let mut job = self.owned_job(user_id, job_id, "update this job").await?;
        job.apply_update(update, Utc::now())?;
        self.jobs.update(job).await
    }

    async fn delete_job(&self, user_id: Uuid, job_id: Uuid) -> AppResult<()> {
        self.owned_job(user_id, job_id, "delete this job").await?;
        self.jobs.delete(job_id).await?;
        tracing::info!(job_id = %job_id, "Job deleted");
        Ok(())
    }

    async fn dashboard(&self, user_id: Uuid) -> AppResult<CompanyDashboard> {
        let company = self.company_of(user_id).await?;
        let jobs = self.jobs.list_by_company(company.id).await?;
        let offers = self.offers.list_by_company(company.id).await?;
        Ok(company_dashboard(&company, &jobs, &offers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        MockCompanyProfileRepository, MockJobRepository, MockOfferRepository,
        MockStudentProfileRepository,
    };
    use crate::service::fixtures;
    use chrono::Duration;
    use common::AppError;
    use domain::{ApplicationStatus, ApplicationUpdate, JobStatus, PackageTerms};

    struct Mocks {
        companies: MockCompanyProfileRepository,
        jobs: MockJobRepository,
        students: MockStudentProfileRepository,
        offers: MockOfferRepository,
    }

    impl Mocks {
        fn with_company(company: CompanyProfile) -> Self {
            let mut companies = MockCompanyProfileRepository::new();
            companies
                .expect_find_by_user()
                .returning(move |_| Ok(Some(company.clone())));
            Self {
                companies,
                jobs: MockJobRepository::new(),
                students: MockStudentProfileRepository::new(),
                offers: MockOfferRepository::new(),
            }
        }

        fn build(self) -> JobBoard {
            JobBoard::new(
                Arc::new(self.companies),
                Arc::new(self.jobs),
                Arc::new(self.students),
                Arc::new(self.offers),
            )
        }
    }

    #[tokio::test]
    async fn test_create_job_defaults() {
        let user_id = Uuid::new_v4();
        let company = fixtures::company(user_id);
        let company_id = company.id;

        let mut mocks = Mocks::with_company(company);
        mocks.jobs.expect_create().returning(|job| Ok(job));

        let mut input = fixtures::job_input("Backend Engineer", 900_000.0, Utc::now() + Duration::days(3));
        input.package.bonuses = Some(100_000.0);

        let job = mocks.build().create_job(user_id, input).await.unwrap();
        assert_eq!(job.company, company_id);
        assert_eq!(job.created_by, user_id);
        assert_eq!(job.status, JobStatus::Open);
        assert_eq!(job.positions, 1);
        assert_eq!(job.package.total_ctc, 1_000_000.0);
    }

    #[tokio::test]
    async fn test_create_job_without_company_profile() {
        let mut companies = MockCompanyProfileRepository::new();
        companies.expect_find_by_user().returning(|_| Ok(None));
        let board = JobBoard::new(
            Arc::new(companies),
            Arc::new(MockJobRepository::new()),
            Arc::new(MockStudentProfileRepository::new()),
            Arc::new(MockOfferRepository::new()),
        );

        let input = fixtures::job_input("Analyst", 1.0, Utc::now());
        let err = board.create_job(Uuid::new_v4(), input).await.unwrap_err();
        assert_eq!(err.user_message(), "Company profile not found");
    }

    #[tokio::test]
    async fn test_update_foreign_job_not_authorized() {
        let user_id = Uuid::new_v4();
        let mut mocks = Mocks::with_company(fixtures::company(user_id));
        let foreign = fixtures::job(Uuid::new_v4(), "Not ours");
        mocks
            .jobs
            .expect_find_by_id()
            .returning(move |_| Ok(Some(foreign.clone())));
        mocks.jobs.expect_update().never();

        let err = mocks
            .build()
            .update_job(user_id, Uuid::new_v4(), JobUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotAuthorized(_)));
        assert_eq!(err.user_message(), "Not authorized to update this job");
    }

    #[tokio::test]
    async fn test_update_package_recomputes_total() {
        let user_id = Uuid::new_v4();
        let company = fixtures::company(user_id);
        let owned = fixtures::job(company.id, "SDE");

        let mut mocks = Mocks::with_company(company);
        mocks
            .jobs
            .expect_find_by_id()
            .returning(move |_| Ok(Some(owned.clone())));
        mocks.jobs.expect_update().returning(|job| Ok(job));

        let update = JobUpdate {
            package: Some(PackageTerms {
                base_salary: Some(1_200_000.0),
                stock_options: Some(300_000.0),
                ..Default::default()
            }),
            status: Some(JobStatus::Closed),
            ..Default::default()
        };
        let job = mocks
            .build()
            .update_job(user_id, Uuid::new_v4(), update)
            .await
            .unwrap();
        assert_eq!(job.package.total_ctc, 1_500_000.0);
        assert_eq!(job.status, JobStatus::Closed);
    }

    #[tokio::test]
    async fn test_delete_missing_job() {
        let user_id = Uuid::new_v4();
        let mut mocks = Mocks::with_company(fixtures::company(user_id));
        mocks.jobs.expect_find_by_id().returning(|_| Ok(None));
        mocks.jobs.expect_delete().never();

        let err = mocks
            .build()
            .delete_job(user_id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Job not found");
    }

    #[tokio::test]
    async fn test_filter_jobs_counts_applications() {
        let user_id = Uuid::new_v4();
        let company = fixtures::company(user_id);
        let first = fixtures::job(company.id, "First");
        let second = fixtures::job(company.id, "Second");
        let (first_id, second_id) = (first.id, second.id);

        let now = Utc::now();
        let mut applicant = fixtures::student(Uuid::new_v4());
        applicant.apply(Uuid::new_v4(), first_id, now).unwrap();
        let shortlisted = applicant.apply(Uuid::new_v4(), second_id, now).unwrap().id;
        applicant
            .update_application(
                shortlisted,
                ApplicationUpdate {
                    status: Some(ApplicationStatus::Shortlisted),
                    exam_details: None,
                },
                now,
            )
            .unwrap();
        let mut other = fixtures::student(Uuid::new_v4());
        other.apply(Uuid::new_v4(), first_id, now).unwrap();

        let mut mocks = Mocks::with_company(company);
        let listed = vec![first, second];
        mocks
            .jobs
            .expect_list_by_company()
            .returning(move |_| Ok(listed.clone()));
        let profiles = vec![applicant, other];
        mocks
            .students
            .expect_list()
            .returning(move || Ok(profiles.clone()));

        let page = mocks
            .build()
            .filter_jobs(user_id, CompanyJobFilter::default())
            .await
            .unwrap();

        assert_eq!(page.pagination.total, 2);
        let stats_for = |id: Uuid| {
            page.jobs
                .iter()
                .find(|j| j.job.id == id)
                .map(|j| j.application_stats.clone())
                .unwrap()
        };
        assert_eq!(stats_for(first_id).total, 2);
        assert_eq!(stats_for(first_id).applied, 2);
        assert_eq!(stats_for(second_id).shortlisted, 1);
    }

    #[tokio::test]
    async fn test_dashboard_without_offers() {
        let user_id = Uuid::new_v4();
        let company = fixtures::company(user_id);
        let open = fixtures::job(company.id, "Open");
        let mut closed = fixtures::job(company.id, "Closed");
        closed.status = JobStatus::Closed;

        let mut mocks = Mocks::with_company(company);
        let listed = vec![open, closed];
        mocks
            .jobs
            .expect_list_by_company()
            .returning(move |_| Ok(listed.clone()));
        mocks.offers.expect_list_by_company().returning(|_| Ok(Vec::new()));

        let dashboard = mocks.build().dashboard(user_id).await.unwrap();
        assert_eq!(dashboard.job_postings.active, 1);
        assert_eq!(dashboard.job_postings.closed, 1);
        assert_eq!(dashboard.offers.acceptance_rate, "0%");
    }
}
