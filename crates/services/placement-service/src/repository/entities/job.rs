//! Job posting entity.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Job;

use super::{enum_from_string, enum_to_string, from_json, to_json};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub location: String,
    pub job_type: String,
    pub positions: i32,
    #[sea_orm(column_type = "JsonBinary")]
    pub eligibility_criteria: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub package: Json,
    pub total_ctc: f64,
    pub application_deadline: DateTimeUtc,
    #[sea_orm(column_type = "JsonBinary")]
    pub selection_process: Json,
    pub status: String,
    pub created_by: Uuid,
    pub is_featured: bool,
    #[sea_orm(column_type = "JsonBinary")]
    pub attachments: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Job {
    type Error = DbErr;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let positions = u32::try_from(model.positions)
            .map_err(|_| DbErr::Custom(format!("job {} has negative positions", model.id)))?;

        Ok(Job {
            id: model.id,
            company: model.company_id,
            title: model.title,
            description: model.description,
            location: model.location,
            job_type: enum_from_string(model.job_type, "job_type")?,
            positions,
            eligibility_criteria: from_json(model.eligibility_criteria, "eligibility_criteria")?,
            package: from_json(model.package, "package")?,
            application_deadline: model.application_deadline,
            selection_process: from_json(model.selection_process, "selection_process")?,
            status: enum_from_string(model.status, "status")?,
            created_by: model.created_by,
            is_featured: model.is_featured,
            attachments: from_json(model.attachments, "attachments")?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<&Job> for ActiveModel {
    type Error = DbErr;

    fn try_from(job: &Job) -> Result<Self, Self::Error> {
        let positions = i32::try_from(job.positions)
            .map_err(|_| DbErr::Custom(format!("positions out of range: {}", job.positions)))?;

        Ok(ActiveModel {
            id: Set(job.id),
            company_id: Set(job.company),
            title: Set(job.title.clone()),
            description: Set(job.description.clone()),
            location: Set(job.location.clone()),
            job_type: Set(enum_to_string(&job.job_type)?),
            positions: Set(positions),
            eligibility_criteria: Set(to_json(&job.eligibility_criteria)?),
            package: Set(to_json(&job.package)?),
            total_ctc: Set(job.package.total_ctc),
            application_deadline: Set(job.application_deadline),
            selection_process: Set(to_json(&job.selection_process)?),
            status: Set(enum_to_string(&job.status)?),
            created_by: Set(job.created_by),
            is_featured: Set(job.is_featured),
            attachments: Set(to_json(&job.attachments)?),
            created_at: Set(job.created_at),
            updated_at: Set(job.updated_at),
        })
    }
}
