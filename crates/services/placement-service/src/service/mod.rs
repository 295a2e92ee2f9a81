//! Use-case services. Each service is a trait for injection plus one
//! repository-backed implementation.

mod announcement_service;
mod application_service;
mod auth_service;
mod job_service;
mod offer_service;
mod placement_office_service;
mod profile_service;
mod resume_service;

pub use announcement_service::{AnnouncementService, NoticeBoard};
pub use application_service::{ApplicationDesk, ApplicationService};
pub use auth_service::{AuthService, AuthToken, Authenticator, Claims};
pub use job_service::{JobBoard, JobService};
pub use offer_service::{OfferDesk, OfferService};
pub use placement_office_service::{PlacementOffice, PlacementOfficeService};
pub use profile_service::{ProfileManager, ProfileService};
pub use resume_service::{ResumeManager, ResumeService};

use uuid::Uuid;

use domain::UserRole;

/// The authenticated caller of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: Uuid, role: UserRole) -> Self {
        Self { id, role }
    }
}

/// Sorted ids with duplicates removed, for batched lookups.
pub(crate) fn distinct(ids: impl IntoIterator<Item = Uuid>) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
pub(crate) mod fixtures;
