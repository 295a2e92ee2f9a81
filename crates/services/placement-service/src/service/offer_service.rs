//! Offer service: issuing offers and the student's accept/reject decision.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{
    CompanySummary, DomainError, JobSummary, NewOffer, Offer, OfferDecision, OfferStatus,
    OfferView, StudentProfile, StudentSummary, UserContact, UserRole,
};

use super::{distinct, Actor};
use crate::repository::{
    CompanyProfileRepository, JobRepository, OfferRepository, StudentProfileRepository,
    UserRepository,
};

/// Offer service trait for dependency injection.
#[async_trait]
pub trait OfferService: Send + Sync {
    /// Issue a pending offer from the company user for one of its jobs.
    async fn create_offer(&self, user_id: Uuid, input: NewOffer) -> AppResult<OfferView>;

    async fn company_offers(&self, user_id: Uuid) -> AppResult<Vec<OfferView>>;

    /// Offers made to the calling student.
    async fn my_offers(&self, user_id: Uuid) -> AppResult<Vec<OfferView>>;

    /// Offers made to a student profile, for the placement office.
    async fn student_offers(&self, student_profile_id: Uuid) -> AppResult<Vec<OfferView>>;

    /// Accept or reject a pending offer. Accepting marks the student placed.
    async fn respond(
        &self,
        user_id: Uuid,
        offer_id: Uuid,
        decision: OfferDecision,
    ) -> AppResult<OfferView>;

    async fn offer(&self, actor: Actor, offer_id: Uuid) -> AppResult<OfferView>;
}

/// Repository-backed `OfferService`
pub struct OfferDesk {
    offers: Arc<dyn OfferRepository>,
    jobs: Arc<dyn JobRepository>,
    companies: Arc<dyn CompanyProfileRepository>,
    students: Arc<dyn StudentProfileRepository>,
    users: Arc<dyn UserRepository>,
}

impl OfferDesk {
    pub fn new(
        offers: Arc<dyn OfferRepository>,
        jobs: Arc<dyn JobRepository>,
        companies: Arc<dyn CompanyProfileRepository>,
        students: Arc<dyn StudentProfileRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            offers,
            jobs,
            companies,
            students,
            users,
        }
    }

    async fn student_of(&self, user_id: Uuid) -> AppResult<StudentProfile> {
        self.students
            .find_by_user(user_id)
            .await?
            .ok_or_not_found("Student profile")
    }

    /// Join offers with their job, company and student in four batched reads.
    async fn views(&self, offers: Vec<Offer>) -> AppResult<Vec<OfferView>> {
        if offers.is_empty() {
            return Ok(Vec::new());
        }

        let jobs = self
            .jobs
            .find_many(distinct(offers.iter().map(|o| o.job)))
            .await?;
        let companies = self
            .companies
            .find_many(distinct(offers.iter().map(|o| o.company)))
            .await?;

        let students = self
            .students
            .find_many(distinct(offers.iter().map(|o| o.student)))
            .await?;
        let users = self
            .users
            .find_many(distinct(students.iter().map(|s| s.user)))
            .await?;

        let jobs: HashMap<Uuid, JobSummary> =
            jobs.iter().map(|job| (job.id, JobSummary::from(job))).collect();
        let companies: HashMap<Uuid, CompanySummary> = companies
            .iter()
            .map(|company| (company.id, CompanySummary::from(company)))
            .collect();
        let users: HashMap<Uuid, UserContact> = users
            .iter()
            .map(|user| (user.id, UserContact::from(user)))
            .collect();
        let students: HashMap<Uuid, StudentSummary> = students
            .iter()
            .map(|profile| {
                let contact = users.get(&profile.user).cloned();
                (profile.id, StudentSummary::new(profile, contact))
            })
            .collect();

        Ok(offers
            .into_iter()
            .map(|offer| OfferView {
                job_info: jobs.get(&offer.job).cloned(),
                company_info: companies.get(&offer.company).cloned(),
                student_info: students.get(&offer.student).cloned(),
                offer,
            })
            .collect())
    }

    async fn view(&self, offer: Offer) -> AppResult<OfferView> {
        self.views(vec![offer])
            .await?
            .pop()
            .ok_or_not_found("Offer")
    }

    async fn ensure_can_view(&self, actor: Actor, offer: &Offer) -> AppResult<()> {
        let allowed = match actor.role {
            UserRole::Tpo => true,
            UserRole::Company => self
                .companies
                .find_by_user(actor.id)
                .await?
                .is_some_and(|company| company.id == offer.company),
            UserRole::Student => self
                .students
                .find_by_user(actor.id)
                .await?
                .is_some_and(|student| student.id == offer.student),
        };

        if allowed {
            Ok(())
        } else {
            tracing::warn!(user_id = %actor.id, offer_id = %offer.id, "Offer access refused");
            Err(DomainError::not_authorized("view this offer").into())
        }
    }
}

#[async_trait]
impl OfferService for OfferDesk {
    async fn create_offer(&self, user_id: Uuid, input: NewOffer) -> AppResult<OfferView> {
        let company = self
            .companies
            .find_by_user(user_id)
            .await?
            .ok_or_not_found("Company profile")?;
        let job = self
            .jobs
            .find_by_id(input.job_id)
            .await?
            .ok_or_not_found("Job")?;
        job.ensure_owned_by(company.id, "create offers for this job")?;

        let mut student = self
            .students
            .find_by_id(input.student_id)
            .await?
            .ok_or_not_found("Student")?;
        if self
            .offers
            .find_by_job_and_student(job.id, student.id)
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicateOffer.into());
        }

        let now = Utc::now();
        let offer = Offer::issue(Uuid::new_v4(), company.id, input, now);
        student.link_offer(offer.id, now);
        let offer = self.offers.create_and_link(offer, student).await?;

        tracing::info!(
            offer_id = %offer.id,
            job_id = %offer.job,
            student_id = %offer.student,
            tier = ?offer.tier,
            "Offer issued"
        );
        self.view(offer).await
    }

    async fn company_offers(&self, user_id: Uuid) -> AppResult<Vec<OfferView>> {
        let company = self
            .companies
            .find_by_user(user_id)
            .await?
            .ok_or_not_found("Company profile")?;
        let offers = self.offers.list_by_company(company.id).await?;
        self.views(offers).await
    }

    async fn my_offers(&self, user_id: Uuid) -> AppResult<Vec<OfferView>> {
        let student = self.student_of(user_id).await?;
        let offers = self.offers.list_by_student(student.id).await?;
        self.views(offers).await
    }

    async fn student_offers(&self, student_profile_id: Uuid) -> AppResult<Vec<OfferView>> {
        let offers = self.offers.list_by_student(student_profile_id).await?;
        self.views(offers).await
    }

    async fn respond(
        &self,
        user_id: Uuid,
        offer_id: Uuid,
        decision: OfferDecision,
    ) -> AppResult<OfferView> {
        let mut student = self.student_of(user_id).await?;
        let mut offer = self
            .offers
            .find_by_id(offer_id)
            .await?
            .ok_or_not_found("Offer")?;
        offer.ensure_addressed_to(student.id, "update this offer")?;

        let now = Utc::now();
        offer.respond(decision, now)?;

        let placed = if offer.status == OfferStatus::Accepted {
            student.mark_placed(now);
            Some(student)
        } else {
            None
        };
        let offer = self.offers.save_response(offer, placed).await?;

        tracing::info!(
            offer_id = %offer.id,
            student_id = %offer.student,
            status = ?offer.status,
            "Offer answered"
        );
        self.view(offer).await
    }

    async fn offer(&self, actor: Actor, offer_id: Uuid) -> AppResult<OfferView> {
        let offer = self
            .offers
            .find_by_id(offer_id)
            .await?
            .ok_or_not_found("Offer")?;
        self.ensure_can_view(actor, &offer).await?;
        self.view(offer).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        MockCompanyProfileRepository, MockJobRepository, MockOfferRepository,
        MockStudentProfileRepository, MockUserRepository,
    };
    use crate::service::fixtures;
    use common::AppError;
    use domain::{CompanyProfile, Job, OfferTier, PlacementStatus};

    struct Mocks {
        offers: MockOfferRepository,
        jobs: MockJobRepository,
        companies: MockCompanyProfileRepository,
        students: MockStudentProfileRepository,
        users: MockUserRepository,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                offers: MockOfferRepository::new(),
                jobs: MockJobRepository::new(),
                companies: MockCompanyProfileRepository::new(),
                students: MockStudentProfileRepository::new(),
                users: MockUserRepository::new(),
            }
        }

        /// Expect the joins made when rendering offer views.
        fn resolving(mut self, job: Job, company: CompanyProfile, student: StudentProfile) -> Self {
            self.jobs
                .expect_find_many()
                .returning(move |_| Ok(vec![job.clone()]));
            self.companies
                .expect_find_many()
                .returning(move |_| Ok(vec![company.clone()]));
            self.students
                .expect_find_many()
                .returning(move |_| Ok(vec![student.clone()]));
            self.users.expect_find_many().returning(|ids| {
                Ok(ids
                    .into_iter()
                    .map(|id| fixtures::student_user(id, "Asha", "CSE"))
                    .collect())
            });
            self
        }

        fn build(self) -> OfferDesk {
            OfferDesk::new(
                Arc::new(self.offers),
                Arc::new(self.jobs),
                Arc::new(self.companies),
                Arc::new(self.students),
                Arc::new(self.users),
            )
        }
    }

    fn new_offer(job_id: Uuid, student_id: Uuid, package: Option<f64>) -> NewOffer {
        NewOffer {
            job_id,
            student_id,
            package,
            tier: None,
            offer_details: None,
            joining_date: None,
            documents: None,
        }
    }

    #[tokio::test]
    async fn test_create_offer_links_student() {
        let company_user = Uuid::new_v4();
        let company = fixtures::company(company_user);
        let job = fixtures::job(company.id, "SDE");
        let student = fixtures::student(Uuid::new_v4());
        let (job_id, student_id) = (job.id, student.id);

        let mut mocks = Mocks::new().resolving(job.clone(), company.clone(), student.clone());
        mocks
            .companies
            .expect_find_by_user()
            .returning(move |_| Ok(Some(company.clone())));
        mocks
            .jobs
            .expect_find_by_id()
            .returning(move |_| Ok(Some(job.clone())));
        mocks
            .students
            .expect_find_by_id()
            .returning(move |_| Ok(Some(student.clone())));
        mocks
            .offers
            .expect_find_by_job_and_student()
            .returning(|_, _| Ok(None));
        mocks
            .offers
            .expect_create_and_link()
            .withf(|offer, student| student.offers == vec![offer.id])
            .times(1)
            .returning(|offer, _| Ok(offer));

        let view = mocks
            .build()
            .create_offer(company_user, new_offer(job_id, student_id, Some(1_500_000.0)))
            .await
            .unwrap();

        assert_eq!(view.offer.status, OfferStatus::Pending);
        assert_eq!(view.offer.tier, Some(OfferTier::for_package(1_500_000.0)));
        assert_eq!(view.job_info.map(|j| j.title), Some("SDE".to_string()));
        assert_eq!(view.company_info.map(|c| c.company_name), Some("Acme".to_string()));
        assert!(view.student_info.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_offer_rejected() {
        let company_user = Uuid::new_v4();
        let company = fixtures::company(company_user);
        let job = fixtures::job(company.id, "SDE");
        let student = fixtures::student(Uuid::new_v4());
        let existing = Offer::issue(
            Uuid::new_v4(),
            company.id,
            new_offer(job.id, student.id, None),
            Utc::now(),
        );
        let (job_id, student_id) = (job.id, student.id);

        let mut mocks = Mocks::new();
        mocks
            .companies
            .expect_find_by_user()
            .returning(move |_| Ok(Some(company.clone())));
        mocks
            .jobs
            .expect_find_by_id()
            .returning(move |_| Ok(Some(job.clone())));
        mocks
            .students
            .expect_find_by_id()
            .returning(move |_| Ok(Some(student.clone())));
        mocks
            .offers
            .expect_find_by_job_and_student()
            .returning(move |_, _| Ok(Some(existing.clone())));
        mocks.offers.expect_create_and_link().never();

        let err = mocks
            .build()
            .create_offer(company_user, new_offer(job_id, student_id, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.user_message(), DomainError::DuplicateOffer.to_string());
    }

    #[tokio::test]
    async fn test_offer_for_foreign_job_refused() {
        let company_user = Uuid::new_v4();
        let company = fixtures::company(company_user);
        let foreign = fixtures::job(Uuid::new_v4(), "Elsewhere");
        let job_id = foreign.id;

        let mut mocks = Mocks::new();
        mocks
            .companies
            .expect_find_by_user()
            .returning(move |_| Ok(Some(company.clone())));
        mocks
            .jobs
            .expect_find_by_id()
            .returning(move |_| Ok(Some(foreign.clone())));

        let err = mocks
            .build()
            .create_offer(company_user, new_offer(job_id, Uuid::new_v4(), None))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Not authorized to create offers for this job");
    }

    #[tokio::test]
    async fn test_offer_for_missing_job() {
        let company_user = Uuid::new_v4();
        let company = fixtures::company(company_user);

        let mut mocks = Mocks::new();
        mocks
            .companies
            .expect_find_by_user()
            .returning(move |_| Ok(Some(company.clone())));
        mocks.jobs.expect_find_by_id().returning(|_| Ok(None));
        mocks.offers.expect_create_and_link().never();

        let err = mocks
            .build()
            .create_offer(company_user, new_offer(Uuid::new_v4(), Uuid::new_v4(), None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.user_message(), "Job not found");
    }

    #[tokio::test]
    async fn test_offer_for_missing_student() {
        let company_user = Uuid::new_v4();
        let company = fixtures::company(company_user);
        let job = fixtures::job(company.id, "SDE");
        let job_id = job.id;

        let mut mocks = Mocks::new();
        mocks
            .companies
            .expect_find_by_user()
            .returning(move |_| Ok(Some(company.clone())));
        mocks
            .jobs
            .expect_find_by_id()
            .returning(move |_| Ok(Some(job.clone())));
        mocks.students.expect_find_by_id().returning(|_| Ok(None));
        mocks.offers.expect_find_by_job_and_student().never();
        mocks.offers.expect_create_and_link().never();

        let err = mocks
            .build()
            .create_offer(company_user, new_offer(job_id, Uuid::new_v4(), None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.user_message(), "Student not found");
    }

    fn pending_offer(company: &CompanyProfile, job: &Job, student: &StudentProfile) -> Offer {
        Offer::issue(
            Uuid::new_v4(),
            company.id,
            new_offer(job.id, student.id, Some(800_000.0)),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_accept_marks_student_placed() {
        let student_user = Uuid::new_v4();
        let company = fixtures::company(Uuid::new_v4());
        let job = fixtures::job(company.id, "SDE");
        let student = fixtures::student(student_user);
        let offer = pending_offer(&company, &job, &student);
        let offer_id = offer.id;

        let mut mocks = Mocks::new().resolving(job, company, student.clone());
        mocks
            .students
            .expect_find_by_user()
            .returning(move |_| Ok(Some(student.clone())));
        mocks
            .offers
            .expect_find_by_id()
            .returning(move |_| Ok(Some(offer.clone())));
        mocks
            .offers
            .expect_save_response()
            .withf(|_, student| {
                student
                    .as_ref()
                    .is_some_and(|s| s.placement_status == PlacementStatus::Placed)
            })
            .times(1)
            .returning(|offer, _| Ok(offer));

        let view = mocks
            .build()
            .respond(student_user, offer_id, OfferDecision::Accepted)
            .await
            .unwrap();
        assert_eq!(view.offer.status, OfferStatus::Accepted);
        assert!(view.offer.response_date.is_some());
    }

    #[tokio::test]
    async fn test_reject_leaves_profile_alone() {
        let student_user = Uuid::new_v4();
        let company = fixtures::company(Uuid::new_v4());
        let job = fixtures::job(company.id, "SDE");
        let student = fixtures::student(student_user);
        let offer = pending_offer(&company, &job, &student);
        let offer_id = offer.id;

        let mut mocks = Mocks::new().resolving(job, company, student.clone());
        mocks
            .students
            .expect_find_by_user()
            .returning(move |_| Ok(Some(student.clone())));
        mocks
            .offers
            .expect_find_by_id()
            .returning(move |_| Ok(Some(offer.clone())));
        mocks
            .offers
            .expect_save_response()
            .withf(|_, student| student.is_none())
            .times(1)
            .returning(|offer, _| Ok(offer));

        let view = mocks
            .build()
            .respond(student_user, offer_id, OfferDecision::Rejected)
            .await
            .unwrap();
        assert_eq!(view.offer.status, OfferStatus::Rejected);
    }

    #[tokio::test]
    async fn test_answered_offer_cannot_change() {
        let student_user = Uuid::new_v4();
        let company = fixtures::company(Uuid::new_v4());
        let job = fixtures::job(company.id, "SDE");
        let student = fixtures::student(student_user);
        let mut offer = pending_offer(&company, &job, &student);
        offer.respond(OfferDecision::Rejected, Utc::now()).unwrap();
        let offer_id = offer.id;

        let mut mocks = Mocks::new();
        mocks
            .students
            .expect_find_by_user()
            .returning(move |_| Ok(Some(student.clone())));
        mocks
            .offers
            .expect_find_by_id()
            .returning(move |_| Ok(Some(offer.clone())));
        mocks.offers.expect_save_response().never();

        let err = mocks
            .build()
            .respond(student_user, offer_id, OfferDecision::Accepted)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_other_student_cannot_respond() {
        let company = fixtures::company(Uuid::new_v4());
        let job = fixtures::job(company.id, "SDE");
        let addressee = fixtures::student(Uuid::new_v4());
        let offer = pending_offer(&company, &job, &addressee);
        let offer_id = offer.id;

        let mut mocks = Mocks::new();
        mocks
            .students
            .expect_find_by_user()
            .returning(|user| Ok(Some(fixtures::student(user))));
        mocks
            .offers
            .expect_find_by_id()
            .returning(move |_| Ok(Some(offer.clone())));

        let err = mocks
            .build()
            .respond(Uuid::new_v4(), offer_id, OfferDecision::Accepted)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Not authorized to update this offer");
    }

    #[tokio::test]
    async fn test_foreign_company_cannot_view_offer() {
        let company = fixtures::company(Uuid::new_v4());
        let job = fixtures::job(company.id, "SDE");
        let student = fixtures::student(Uuid::new_v4());
        let offer = pending_offer(&company, &job, &student);
        let offer_id = offer.id;

        let mut mocks = Mocks::new();
        mocks
            .offers
            .expect_find_by_id()
            .returning(move |_| Ok(Some(offer.clone())));
        mocks
            .companies
            .expect_find_by_user()
            .returning(|user| Ok(Some(fixtures::company(user))));

        let err = mocks
            .build()
            .offer(Actor::new(Uuid::new_v4(), UserRole::Company), offer_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotAuthorized(_)));
    }

    #[tokio::test]
    async fn test_student_without_offers_gets_empty_list() {
        let mut mocks = Mocks::new();
        mocks
            .offers
            .expect_list_by_student()
            .returning(|_| Ok(Vec::new()));
        mocks.jobs.expect_find_many().never();

        let offers = mocks.build().student_offers(Uuid::new_v4()).await.unwrap();
        assert!(offers.is_empty());
    }
}
