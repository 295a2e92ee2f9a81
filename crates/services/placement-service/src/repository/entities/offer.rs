//! Offer entity.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Offer;

use super::{enum_from_string, enum_to_string, from_json, to_json};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "offers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub job_id: Uuid,
    pub student_id: Uuid,
    pub company_id: Uuid,
    pub package: Option<f64>,
    pub tier: Option<String>,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub offer_details: Option<String>,
    pub offer_date: DateTimeUtc,
    pub response_date: Option<DateTimeUtc>,
    pub joining_date: Option<DateTimeUtc>,
    #[sea_orm(column_type = "JsonBinary")]
    pub documents: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Offer {
    type Error = DbErr;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let tier = model
            .tier
            .map(|tier| enum_from_string(tier, "tier"))
            .transpose()?;

        Ok(Offer {
            id: model.id,
            job: model.job_id,
            student: model.student_id,
            company: model.company_id,
            package: model.package,
            tier,
            status: enum_from_string(model.status, "status")?,
            offer_details: model.offer_details,
            offer_date: model.offer_date,
            response_date: model.response_date,
            joining_date: model.joining_date,
            documents: from_json(model.documents, "documents")?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<&Offer> for ActiveModel {
    type Error = DbErr;

    fn try_from(offer: &Offer) -> Result<Self, Self::Error> {
        Ok(ActiveModel {
            id: Set(offer.id),
            job_id: Set(offer.job),
            student_id: Set(offer.student),
            company_id: Set(offer.company),
            package: Set(offer.package),
            tier: Set(offer.tier.as_ref().map(enum_to_string).transpose()?),
            status: Set(enum_to_string(&offer.status)?),
            offer_details: Set(offer.offer_details.clone()),
            offer_date: Set(offer.offer_date),
            response_date: Set(offer.response_date),
            joining_date: Set(offer.joining_date),
            documents: Set(to_json(&offer.documents)?),
            created_at: Set(offer.created_at),
            updated_at: Set(offer.updated_at),
        })
    }
}
