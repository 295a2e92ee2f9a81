//! Company profile entity.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::CompanyProfile;

use super::{from_json, to_json};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "company_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub company_name: String,
    pub website: Option<String>,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub company_size: Option<String>,
    pub established_year: Option<i32>,
    pub logo: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub social_media: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for CompanyProfile {
    type Error = DbErr;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(CompanyProfile {
            id: model.id,
            user: model.user_id,
            company_name: model.company_name,
            website: model.website,
            description: model.description,
            industry: model.industry,
            location: model.location,
            company_size: model.company_size,
            established_year: model.established_year,
            logo: model.logo,
            social_media: from_json(model.social_media, "social_media")?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<&CompanyProfile> for ActiveModel {
    type Error = DbErr;

    fn try_from(profile: &CompanyProfile) -> Result<Self, Self::Error> {
        Ok(ActiveModel {
            id: Set(profile.id),
            user_id: Set(profile.user),
            company_name: Set(profile.company_name.clone()),
            website: Set(profile.website.clone()),
            description: Set(profile.description.clone()),
            industry: Set(profile.industry.clone()),
            location: Set(profile.location.clone()),
            company_size: Set(profile.company_size.clone()),
            established_year: Set(profile.established_year),
            logo: Set(profile.logo.clone()),
            social_media: Set(to_json(&profile.social_media)?),
            created_at: Set(profile.created_at),
            updated_at: Set(profile.updated_at),
        })
    }
}
