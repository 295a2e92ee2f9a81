//! Placement Service Library
//!
//! Persistence and use cases for the campus placement tracker. The HTTP
//! gateway embeds it through [`Services`].

pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use sea_orm::{DatabaseConnection, DbErr};
use tracing::info;

use common::{DatabaseConfig, JwtConfig};

use crate::infra::Database;
use crate::repository::{
    AnnouncementStore, CompanyProfileStore, JobStore, OfferStore, ResumeStore,
    StudentProfileStore, UserStore,
};
use crate::service::{
    AnnouncementService, ApplicationDesk, ApplicationService, AuthService, Authenticator,
    JobBoard, JobService, NoticeBoard, OfferDesk, OfferService, PlacementOffice,
    PlacementOfficeService, ProfileManager, ProfileService, ResumeManager, ResumeService,
};

/// Every use-case service, behind its trait.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthService>,
    pub profiles: Arc<dyn ProfileService>,
    pub jobs: Arc<dyn JobService>,
    pub applications: Arc<dyn ApplicationService>,
    pub offers: Arc<dyn OfferService>,
    pub announcements: Arc<dyn AnnouncementService>,
    pub placement_office: Arc<dyn PlacementOfficeService>,
    pub resumes: Arc<dyn ResumeService>,
}

impl Services {
    /// Wire the SeaORM stores into the services.
    pub fn new(db: DatabaseConnection, jwt: JwtConfig) -> Self {
        let users = Arc::new(UserStore::new(db.clone()));
        let students = Arc::new(StudentProfileStore::new(db.clone()));
        let companies = Arc::new(CompanyProfileStore::new(db.clone()));
        let jobs = Arc::new(JobStore::new(db.clone()));
        let offers = Arc::new(OfferStore::new(db.clone()));
        let announcements = Arc::new(AnnouncementStore::new(db.clone()));
        let resumes = Arc::new(ResumeStore::new(db));

        Self {
            auth: Arc::new(Authenticator::new(
                users.clone(),
                students.clone(),
                companies.clone(),
                jwt,
            )),
            profiles: Arc::new(ProfileManager::new(
                users.clone(),
                students.clone(),
                companies.clone(),
            )),
            jobs: Arc::new(JobBoard::new(
                companies.clone(),
                jobs.clone(),
                students.clone(),
                offers.clone(),
            )),
            applications: Arc::new(ApplicationDesk::new(
                users.clone(),
                students.clone(),
                companies.clone(),
                jobs.clone(),
            )),
            offers: Arc::new(OfferDesk::new(
                offers,
                jobs,
                companies.clone(),
                students.clone(),
                users.clone(),
            )),
            announcements: Arc::new(NoticeBoard::new(announcements, users.clone())),
            placement_office: Arc::new(PlacementOffice::new(
                users,
                students.clone(),
                companies,
            )),
            resumes: Arc::new(ResumeManager::new(resumes, students)),
        }
    }
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(config: &DatabaseConfig, action: MigrateAction) -> Result<(), DbErr> {
    let db = Database::connect_without_migrations(config).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
