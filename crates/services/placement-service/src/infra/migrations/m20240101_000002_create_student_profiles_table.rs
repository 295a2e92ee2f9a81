//! Migration: student profiles. Applications, offers and upcoming exams are
//! embedded so the whole aggregate is written with one row update.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StudentProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(StudentProfiles::PersonalInfo).json_binary().not_null())
                    .col(ColumnDef::new(StudentProfiles::AcademicDetails).json_binary().not_null())
                    .col(ColumnDef::new(StudentProfiles::Skills).json_binary().not_null())
                    .col(ColumnDef::new(StudentProfiles::Projects).json_binary().not_null())
                    .col(ColumnDef::new(StudentProfiles::Certifications).json_binary().not_null())
                    .col(
                        ColumnDef::new(StudentProfiles::PlacementStatus)
                            .string_len(16)
                            .not_null()
                            .default("Not Placed"),
                    )
                    .col(ColumnDef::new(StudentProfiles::Offers).json_binary().not_null())
                    .col(ColumnDef::new(StudentProfiles::AppliedJobs).json_binary().not_null())
                    .col(ColumnDef::new(StudentProfiles::UpcomingExams).json_binary().not_null())
                    .col(
                        ColumnDef::new(StudentProfiles::UpgradesUsed)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_profiles_user")
                            .from(StudentProfiles::Table, StudentProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StudentProfiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum StudentProfiles {
    Table,
    Id,
    UserId,
    PersonalInfo,
    AcademicDetails,
    Skills,
    Projects,
    Certifications,
    PlacementStatus,
    Offers,
    AppliedJobs,
    UpcomingExams,
    UpgradesUsed,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
