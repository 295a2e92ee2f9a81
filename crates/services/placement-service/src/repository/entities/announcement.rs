//! Announcement entity.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Announcement;

use super::{from_json, to_json};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "announcements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author_id: Uuid,
    #[sea_orm(column_type = "JsonBinary")]
    pub target_audience: Json,
    pub is_active: bool,
    #[sea_orm(column_type = "JsonBinary")]
    pub attachments: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Announcement {
    type Error = DbErr;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Announcement {
            id: model.id,
            title: model.title,
            content: model.content,
            author: model.author_id,
            target_audience: from_json(model.target_audience, "target_audience")?,
            is_active: model.is_active,
            attachments: from_json(model.attachments, "attachments")?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<&Announcement> for ActiveModel {
    type Error = DbErr;

    fn try_from(announcement: &Announcement) -> Result<Self, Self::Error> {
        Ok(ActiveModel {
            id: Set(announcement.id),
            title: Set(announcement.title.clone()),
            content: Set(announcement.content.clone()),
            author_id: Set(announcement.author),
            target_audience: Set(to_json(&announcement.target_audience)?),
            is_active: Set(announcement.is_active),
            attachments: Set(to_json(&announcement.attachments)?),
            created_at: Set(announcement.created_at),
            updated_at: Set(announcement.updated_at),
        })
    }
}
