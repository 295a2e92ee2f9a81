//! Migration: offers. No foreign keys to jobs or students, so deleting a job
//! leaves its offers in place.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Offers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Offers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Offers::JobId).uuid().not_null())
                    .col(ColumnDef::new(Offers::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Offers::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Offers::Package).double().null())
                    .col(ColumnDef::new(Offers::Tier).string_len(16).null())
                    .col(
                        ColumnDef::new(Offers::Status)
                            .string_len(16)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(Offers::OfferDetails).text().null())
                    .col(
                        ColumnDef::new(Offers::OfferDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Offers::ResponseDate).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Offers::JoiningDate).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Offers::Documents).json_binary().not_null())
                    .col(
                        ColumnDef::new(Offers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Offers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One offer per (job, student)
        manager
            .create_index(
                Index::create()
                    .name("idx_offers_job_student")
                    .table(Offers::Table)
                    .col(Offers::JobId)
                    .col(Offers::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_offers_company_id")
                    .table(Offers::Table)
                    .col(Offers::CompanyId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Offers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Offers {
    Table,
    Id,
    JobId,
    StudentId,
    CompanyId,
    Package,
    Tier,
    Status,
    OfferDetails,
    OfferDate,
    ResponseDate,
    JoiningDate,
    Documents,
    CreatedAt,
    UpdatedAt,
}
