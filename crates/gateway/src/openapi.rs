//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::announcement_handler::CreateAnnouncementRequest;
use crate::handlers::auth_handler::{LoginRequest, RegisterRequest, TokenResponse};
use crate::handlers::company_handler::HrInfoRequest;
use crate::handlers::health_handler::{HealthResponse, ServiceHealth, ServiceStatus};
use crate::handlers::offer_handler::OfferStatusRequest;
use crate::handlers::profile_handler::ApplicationUpdateRequest;
use crate::handlers::tpo_handler::{PlacementStatusRequest, TpoProfileRequest};
use crate::handlers::MessageResponse;
use domain::{
    AcademicRecord, Announcement, AnnouncementAttachment, AnnouncementUpdate, AnnouncementView,
    Application, ApplicationStats, ApplicationStatus, ApplicationUpdate, Attachment, Audience,
    AuthorSummary, Certification, CompanyContact, CompanyDashboard, CompanyJobPage, CompanyJobSort,
    CompanyOverview, CompanyProfile, CompanyProfileUpdate, CompanyProfileView, CompanySummary,
    EligibilityCriteria, ExamDetails, ExamListing, ExamSchedule, ExamType, Job, JobListing, JobPage,
    JobPostingStats, JobSort, JobStatus, JobSummary, JobType, JobUpdate, JobWithStats, NewJob,
    NewOffer, NewResume, Offer, OfferDecision, OfferDistribution, OfferStats, OfferStatus,
    OfferTier, OfferView, Package, PackageTerms, Pagination, PersonalInfo, PlacementStats,
    PlacementStatus, Project, PublicStudentProfile, Resume, ResumeData, ResumeUpdate, RoleDetails,
    Round, SelectionProcess, SocialMedia, SortOrder, StudentIdentity, StudentProfile,
    StudentProfileUpdate, StudentProfileView, StudentSummary, UpcomingExam, UserContact,
    UserResponse, UserRole,
};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health_handler::health_check,
        crate::handlers::auth_handler::register,
        crate::handlers::auth_handler::login,
        crate::handlers::profile_handler::get_my_profile,
        crate::handlers::profile_handler::update_my_profile,
        crate::handlers::profile_handler::apply_to_job,
        crate::handlers::profile_handler::upcoming_exams,
        crate::handlers::profile_handler::update_application,
        crate::handlers::profile_handler::available_jobs,
        crate::handlers::company_handler::create_job,
        crate::handlers::company_handler::my_jobs,
        crate::handlers::company_handler::filter_jobs,
        crate::handlers::company_handler::update_job,
        crate::handlers::company_handler::delete_job,
        crate::handlers::company_handler::get_profile,
        crate::handlers::company_handler::update_profile,
        crate::handlers::company_handler::update_hr_info,
        crate::handlers::company_handler::dashboard,
        crate::handlers::company_handler::search_students,
        crate::handlers::company_handler::get_student,
        crate::handlers::company_handler::create_offer,
        crate::handlers::company_handler::my_offers,
        crate::handlers::offer_handler::create_offer,
        crate::handlers::offer_handler::company_offers,
        crate::handlers::offer_handler::my_offers,
        crate::handlers::offer_handler::student_offers,
        crate::handlers::offer_handler::respond_to_offer,
        crate::handlers::offer_handler::get_offer,
        crate::handlers::announcement_handler::list_announcements,
        crate::handlers::announcement_handler::get_announcement,
        crate::handlers::announcement_handler::create_announcement,
        crate::handlers::announcement_handler::update_announcement,
        crate::handlers::announcement_handler::delete_announcement,
        crate::handlers::resume_handler::list_resumes,
        crate::handlers::resume_handler::get_resume,
        crate::handlers::resume_handler::create_resume,
        crate::handlers::resume_handler::update_resume,
        crate::handlers::resume_handler::delete_resume,
        crate::handlers::tpo_handler::get_profile,
        crate::handlers::tpo_handler::update_profile,
        crate::handlers::tpo_handler::list_students,
        crate::handlers::tpo_handler::get_student,
        crate::handlers::tpo_handler::set_placement_status,
        crate::handlers::tpo_handler::list_companies,
        crate::handlers::tpo_handler::get_company,
        crate::handlers::tpo_handler::statistics,
    ),
    components(
        schemas(
            // Requests
            RegisterRequest,
            LoginRequest,
            TokenResponse,
            ApplicationUpdateRequest,
            HrInfoRequest,
            OfferStatusRequest,
            CreateAnnouncementRequest,
            TpoProfileRequest,
            PlacementStatusRequest,
            MessageResponse,
            HealthResponse,
            ServiceStatus,
            ServiceHealth,
            // Identity
            UserRole,
            RoleDetails,
            UserResponse,
            UserContact,
            // Students
            StudentProfile,
            StudentProfileUpdate,
            StudentProfileView,
            StudentIdentity,
            StudentSummary,
            PublicStudentProfile,
            PersonalInfo,
            AcademicRecord,
            Project,
            Certification,
            PlacementStatus,
            // Applications
            Application,
            ApplicationStatus,
            ApplicationUpdate,
            ApplicationStats,
            ExamDetails,
            ExamSchedule,
            ExamType,
            UpcomingExam,
            ExamListing,
            // Companies and jobs
            CompanyProfile,
            CompanyProfileUpdate,
            CompanyProfileView,
            CompanyContact,
            CompanySummary,
            SocialMedia,
            Job,
            NewJob,
            JobUpdate,
            JobStatus,
            JobType,
            JobSummary,
            JobListing,
            JobPage,
            JobWithStats,
            CompanyJobPage,
            JobSort,
            CompanyJobSort,
            SortOrder,
            Pagination,
            EligibilityCriteria,
            Package,
            PackageTerms,
            SelectionProcess,
            Round,
            Attachment,
            // Offers
            Offer,
            NewOffer,
            OfferView,
            OfferStatus,
            OfferDecision,
            OfferTier,
            // Announcements
            Announcement,
            AnnouncementUpdate,
            AnnouncementView,
            AnnouncementAttachment,
            Audience,
            AuthorSummary,
            // Resumes
            Resume,
            NewResume,
            ResumeUpdate,
            ResumeData,
            // Statistics
            PlacementStats,
            OfferStats,
            CompanyDashboard,
            CompanyOverview,
            JobPostingStats,
            OfferDistribution,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness of backing services"),
        (name = "Authentication", description = "Registration and login"),
        (name = "Profile", description = "Student profile"),
        (name = "Applications", description = "Job applications, exams and job search"),
        (name = "Company", description = "Company postings, profile and dashboard"),
        (name = "Offers", description = "Offer lifecycle"),
        (name = "Announcements", description = "Placement office notice board"),
        (name = "Resumes", description = "Stored student resumes"),
        (name = "TPO", description = "Placement office administration"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
