//! Migration: company profiles.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CompanyProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompanyProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CompanyProfiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(CompanyProfiles::CompanyName).string().not_null())
                    .col(ColumnDef::new(CompanyProfiles::Website).string().null())
                    .col(ColumnDef::new(CompanyProfiles::Description).text().null())
                    .col(ColumnDef::new(CompanyProfiles::Industry).string().null())
                    .col(ColumnDef::new(CompanyProfiles::Location).string().null())
                    .col(ColumnDef::new(CompanyProfiles::CompanySize).string().null())
                    .col(ColumnDef::new(CompanyProfiles::EstablishedYear).integer().null())
                    .col(ColumnDef::new(CompanyProfiles::Logo).string().null())
                    .col(ColumnDef::new(CompanyProfiles::SocialMedia).json_binary().not_null())
                    .col(
                        ColumnDef::new(CompanyProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CompanyProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_profiles_user")
                            .from(CompanyProfiles::Table, CompanyProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CompanyProfiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CompanyProfiles {
    Table,
    Id,
    UserId,
    CompanyName,
    Website,
    Description,
    Industry,
    Location,
    CompanySize,
    EstablishedYear,
    Logo,
    SocialMedia,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
