//! Repository layer for data access.
//!
//! One trait per aggregate for dependency injection, each backed by a SeaORM
//! `*Store`. Aggregates are loaded and saved whole.

pub mod entities;
mod announcement_repository;
mod company_repository;
mod job_repository;
mod offer_repository;
mod resume_repository;
mod student_repository;
mod user_repository;

pub use announcement_repository::{AnnouncementRepository, AnnouncementStore};
pub use company_repository::{CompanyProfileRepository, CompanyProfileStore};
pub use job_repository::{JobRepository, JobStore};
pub use offer_repository::{OfferRepository, OfferStore};
pub use resume_repository::{ResumeRepository, ResumeStore};
pub use student_repository::{StudentProfileRepository, StudentProfileStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use announcement_repository::MockAnnouncementRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use company_repository::MockCompanyProfileRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use job_repository::MockJobRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use offer_repository::MockOfferRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use resume_repository::MockResumeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use student_repository::MockStudentProfileRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

use sea_orm::{DbErr, SqlErr};

use common::AppError;

/// Map a unique-index violation to `on_conflict`, anything else to a storage error.
pub(crate) fn unique_violation_or(err: DbErr, on_conflict: impl FnOnce() -> AppError) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => on_conflict(),
        _ => AppError::from(err),
    }
}
