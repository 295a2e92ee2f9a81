//! Resume entity.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Resume;

use super::{from_json, to_json};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "resumes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub student_id: Uuid,
    pub template: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub data: Json,
    pub version: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Resume {
    type Error = DbErr;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Resume {
            id: model.id,
            student: model.student_id,
            template: model.template,
            data: from_json(model.data, "data")?,
            version: model.version,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<&Resume> for ActiveModel {
    type Error = DbErr;

    fn try_from(resume: &Resume) -> Result<Self, Self::Error> {
        Ok(ActiveModel {
            id: Set(resume.id),
            student_id: Set(resume.student),
            template: Set(resume.template.clone()),
            data: Set(to_json(&resume.data)?),
            version: Set(resume.version.clone()),
            created_at: Set(resume.created_at),
            updated_at: Set(resume.updated_at),
        })
    }
}
