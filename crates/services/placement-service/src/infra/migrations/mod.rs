//! Database migrations.
//!
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}.
//! Embedded sub-documents live in JSONB columns of the owning row.

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_student_profiles_table;
mod m20240101_000003_create_company_profiles_table;
mod m20240101_000004_create_jobs_table;
mod m20240101_000005_create_offers_table;
mod m20240101_000006_create_announcements_table;
mod m20240101_000007_create_resumes_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_student_profiles_table::Migration),
            Box::new(m20240101_000003_create_company_profiles_table::Migration),
            Box::new(m20240101_000004_create_jobs_table::Migration),
            Box::new(m20240101_000005_create_offers_table::Migration),
            Box::new(m20240101_000006_create_announcements_table::Migration),
            Box::new(m20240101_000007_create_resumes_table::Migration),
        ]
    }
}
