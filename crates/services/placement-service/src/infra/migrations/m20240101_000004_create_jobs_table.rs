//! Migration: job postings. `total_ctc` is duplicated out of the package
//! document so listings can sort and filter on it.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Jobs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Jobs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Jobs::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Jobs::Title).string().not_null())
                    .col(ColumnDef::new(Jobs::Description).text().not_null())
                    .col(ColumnDef::new(Jobs::Location).string().not_null())
                    .col(ColumnDef::new(Jobs::JobType).string_len(16).not_null())
                    .col(ColumnDef::new(Jobs::Positions).integer().not_null().default(1))
                    .col(ColumnDef::new(Jobs::EligibilityCriteria).json_binary().not_null())
                    .col(ColumnDef::new(Jobs::Package).json_binary().not_null())
                    .col(ColumnDef::new(Jobs::TotalCtc).double().not_null().default(0.0))
                    .col(
                        ColumnDef::new(Jobs::ApplicationDeadline)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Jobs::SelectionProcess).json_binary().not_null())
                    .col(
                        ColumnDef::new(Jobs::Status)
                            .string_len(16)
                            .not_null()
                            .default("Open"),
                    )
                    .col(ColumnDef::new(Jobs::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Jobs::IsFeatured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Jobs::Attachments).json_binary().not_null())
                    .col(
                        ColumnDef::new(Jobs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Jobs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jobs_company")
                            .from(Jobs::Table, Jobs::CompanyId)
                            .to(CompanyProfiles::Table, CompanyProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_jobs_company_id")
                    .table(Jobs::Table)
                    .col(Jobs::CompanyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_jobs_status_deadline")
                    .table(Jobs::Table)
                    .col(Jobs::Status)
                    .col(Jobs::ApplicationDeadline)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Jobs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Jobs {
    Table,
    Id,
    CompanyId,
    Title,
    Description,
    Location,
    JobType,
    Positions,
    EligibilityCriteria,
    Package,
    TotalCtc,
    ApplicationDeadline,
    SelectionProcess,
    Status,
    CreatedBy,
    IsFeatured,
    Attachments,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CompanyProfiles {
    Table,
    Id,
}
