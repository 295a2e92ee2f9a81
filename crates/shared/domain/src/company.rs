//! Company profile entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::user::{RoleDetails, User};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SocialMedia {
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
}

/// Company profile, one per company user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub id: Uuid,
    pub user: Uuid,
    pub company_name: String,
    pub website: Option<String>,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub company_size: Option<String>,
    pub established_year: Option<i32>,
    pub logo: Option<String>,
    #[serde(default)]
    pub social_media: SocialMedia,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CompanyProfile {
    /// Profile created at registration, named after the registering user.
    pub fn new(id: Uuid, user: Uuid, company_name: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user,
            company_name,
            website: None,
            description: None,
            industry: None,
            location: None,
            company_size: None,
            established_year: None,
            logo: None,
            social_media: SocialMedia::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace each supplied field. The company name may not be blanked.
    pub fn apply_update(&mut self, update: CompanyProfileUpdate, now: DateTime<Utc>) -> DomainResult<()> {
        if let Some(name) = update.company_name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("Company name is required"));
            }
            self.company_name = name;
        }
        if update.website.is_some() {
            self.website = update.website;
        }
        if update.description.is_some() {
            self.description = update.description;
        }
        if update.industry.is_some() {
            self.industry = update.industry;
        }
        if update.location.is_some() {
            self.location = update.location;
        }
        if update.company_size.is_some() {
            self.company_size = update.company_size;
        }
        if update.established_year.is_some() {
            self.established_year = update.established_year;
        }
        if update.logo.is_some() {
            self.logo = update.logo;
        }
        if let Some(social_media) = update.social_media {
            self.social_media = social_media;
        }
        self.updated_at = now;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfileUpdate {
    pub company_name: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub company_size: Option<String>,
    pub established_year: Option<i32>,
    pub logo: Option<String>,
    pub social_media: Option<SocialMedia>,
}

/// Company user fields joined onto a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CompanyContact {
    pub name: String,
    pub email: String,
    pub hr_name: Option<String>,
    pub contact_number: Option<String>,
}

impl From<&User> for CompanyContact {
    fn from(user: &User) -> Self {
        let (hr_name, contact_number) = match &user.details {
            RoleDetails::Company {
                hr_name,
                contact_number,
            } => (Some(hr_name.clone()), Some(contact_number.clone())),
            _ => (None, None),
        };
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            hr_name,
            contact_number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfileView {
    #[serde(flatten)]
    pub profile: CompanyProfile,
    pub user_info: Option<CompanyContact>,
}

/// Short company projection joined into jobs and offers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub id: Uuid,
    pub company_name: String,
    pub website: Option<String>,
    pub industry: Option<String>,
}

impl From<&CompanyProfile> for CompanySummary {
    fn from(profile: &CompanyProfile) -> Self {
        Self {
            id: profile.id,
            company_name: profile.company_name.clone(),
            website: profile.website.clone(),
            industry: profile.industry.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_replaces_supplied_fields() {
        let now = Utc::now();
        let mut profile = CompanyProfile::new(Uuid::new_v4(), Uuid::new_v4(), "Acme".to_string(), now);
        profile
            .apply_update(
                CompanyProfileUpdate {
                    industry: Some("Software".to_string()),
                    established_year: Some(1999),
                    ..Default::default()
                },
                now,
            )
            .unwrap();

        assert_eq!(profile.company_name, "Acme");
        assert_eq!(profile.industry.as_deref(), Some("Software"));
        assert_eq!(profile.established_year, Some(1999));
    }

    #[test]
    fn test_blank_company_name_rejected() {
        let now = Utc::now();
        let mut profile = CompanyProfile::new(Uuid::new_v4(), Uuid::new_v4(), "Acme".to_string(), now);
        let err = profile
            .apply_update(
                CompanyProfileUpdate {
                    company_name: Some("   ".to_string()),
                    ..Default::default()
                },
                now,
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "Company name is required");
        assert_eq!(profile.company_name, "Acme");
    }
}
