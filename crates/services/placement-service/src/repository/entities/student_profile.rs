//! Student profile entity. Every sub-document is a JSONB column.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{StudentProfile, MAX_UPGRADES};

use super::{enum_from_string, enum_to_string, from_json, to_json};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "student_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    #[sea_orm(column_type = "JsonBinary")]
    pub personal_info: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub academic_details: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub skills: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub projects: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub certifications: Json,
    pub placement_status: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub offers: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub applied_jobs: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub upcoming_exams: Json,
    pub upgrades_used: i16,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for StudentProfile {
    type Error = DbErr;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let upgrades_used = u8::try_from(model.upgrades_used.max(0))
            .unwrap_or(MAX_UPGRADES)
            .min(MAX_UPGRADES);

        Ok(StudentProfile {
            id: model.id,
            user: model.user_id,
            personal_info: from_json(model.personal_info, "personal_info")?,
            academic_details: from_json(model.academic_details, "academic_details")?,
            skills: from_json(model.skills, "skills")?,
            projects: from_json(model.projects, "projects")?,
            certifications: from_json(model.certifications, "certifications")?,
            placement_status: enum_from_string(model.placement_status, "placement_status")?,
            offers: from_json(model.offers, "offers")?,
            applied_jobs: from_json(model.applied_jobs, "applied_jobs")?,
            upcoming_exams: from_json(model.upcoming_exams, "upcoming_exams")?,
            upgrades_used,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<&StudentProfile> for ActiveModel {
    type Error = DbErr;

    fn try_from(profile: &StudentProfile) -> Result<Self, Self::Error> {
        Ok(ActiveModel {
            id: Set(profile.id),
            user_id: Set(profile.user),
            personal_info: Set(to_json(&profile.personal_info)?),
            academic_details: Set(to_json(&profile.academic_details)?),
            skills: Set(to_json(&profile.skills)?),
            projects: Set(to_json(&profile.projects)?),
            certifications: Set(to_json(&profile.certifications)?),
            placement_status: Set(enum_to_string(&profile.placement_status)?),
            offers: Set(to_json(&profile.offers)?),
            applied_jobs: Set(to_json(&profile.applied_jobs)?),
            upcoming_exams: Set(to_json(&profile.upcoming_exams)?),
            upgrades_used: Set(i16::from(profile.upgrades_used.min(MAX_UPGRADES))),
            created_at: Set(profile.created_at),
            updated_at: Set(profile.updated_at),
        })
    }
}
