//! Domain layer - Core business entities and value objects.
//!
//! Pure placement-cell logic with no infrastructure dependencies: identities
//! and roles, student/company profiles, jobs, the application and offer
//! lifecycles, announcements, resumes, job search and dashboard aggregation.
//! Operations that depend on the clock take `now` explicitly.

pub mod announcement;
pub mod application;
pub mod company;
pub mod constants;
pub mod error;
pub mod job;
pub mod offer;
pub mod pagination;
pub mod password;
pub mod resume;
pub mod search;
pub mod stats;
pub mod student;
pub mod user;

pub use announcement::{
    Announcement, AnnouncementAttachment, AnnouncementUpdate, AnnouncementView, Audience,
    AuthorSummary, NewAnnouncement,
};
pub use application::{
    derive_upcoming_exams, Application, ApplicationStats, ApplicationStatus, ApplicationUpdate,
    ExamDetails, ExamListing, ExamSchedule, ExamType, UpcomingExam,
};
pub use company::{
    CompanyContact, CompanyProfile, CompanyProfileUpdate, CompanyProfileView, CompanySummary,
    SocialMedia,
};
pub use constants::*;
pub use error::{parse_id, DomainError, DomainResult};
pub use job::{
    Attachment, EligibilityCriteria, Job, JobStatus, JobSummary, JobType, JobUpdate, NewJob,
    Package, PackageTerms, Round, SelectionProcess,
};
pub use offer::{NewOffer, Offer, OfferDecision, OfferStatus, OfferTier, OfferView};
pub use pagination::{PageRequest, Pagination};
pub use password::Password;
pub use resume::{NewResume, Resume, ResumeData, ResumeUpdate};
pub use search::{
    filter_company_jobs, search_available_jobs, CompanyJobFilter, CompanyJobPage, CompanyJobSort,
    JobListing, JobPage, JobSearchQuery, JobSort, JobWithStats, SortOrder, StudentEligibility,
    StudentSearchQuery,
};
pub use stats::{
    company_dashboard, percentage, percentage_label, placement_stats, CompanyDashboard, CompanyOverview,
    JobPostingStats, OfferDistribution, OfferStats, PlacementStats,
};
pub use student::{
    AcademicRecord, Certification, PersonalInfo, PlacementStatus, Project, PublicStudentProfile,
    StudentIdentity, StudentProfile, StudentProfileUpdate, StudentProfileView, StudentSummary,
};
pub use user::{RegisterUser, RoleDetails, User, UserContact, UserResponse, UserRole};
