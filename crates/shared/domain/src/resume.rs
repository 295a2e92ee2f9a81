//! Student-owned resume records. Storage only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DEFAULT_RESUME_TEMPLATE;
use crate::error::{DomainError, DomainResult};
use crate::student::{AcademicRecord, Certification, PersonalInfo, Project};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub personal_info: Option<PersonalInfo>,
    #[serde(default)]
    pub academic_details: Vec<AcademicRecord>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    pub career_objective: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: Uuid,
    pub student: Uuid,
    pub template: String,
    pub data: ResumeData,
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resume {
    pub fn create(id: Uuid, student: Uuid, input: NewResume, now: DateTime<Utc>) -> DomainResult<Self> {
        if input.version.trim().is_empty() {
            return Err(DomainError::validation("Version is required"));
        }
        let template = input
            .template
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RESUME_TEMPLATE.to_string());

        Ok(Self {
            id,
            student,
            template,
            data: input.data,
            version: input.version,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn ensure_owned_by(&self, student_id: Uuid, action: &str) -> DomainResult<()> {
        if self.student == student_id {
            Ok(())
        } else {
            Err(DomainError::not_authorized(action))
        }
    }

    pub fn apply_update(&mut self, update: ResumeUpdate, now: DateTime<Utc>) {
        if let Some(template) = update.template.filter(|t| !t.trim().is_empty()) {
            self.template = template;
        }
        if let Some(data) = update.data {
            self.data = data;
        }
        if let Some(version) = update.version.filter(|v| !v.trim().is_empty()) {
            self.version = version;
        }
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewResume {
    pub template: Option<String>,
    #[serde(default)]
    pub data: ResumeData,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ResumeUpdate {
    pub template: Option<String>,
    pub data: Option<ResumeData>,
    pub version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template() {
        let resume = Resume::create(
            Uuid::new_v4(),
            Uuid::new_v4(),
            NewResume {
                template: None,
                data: ResumeData::default(),
                version: "1".to_string(),
            },
            Utc::now(),
        )
        .unwrap();
        assert_eq!(resume.template, "classic");
    }

    #[test]
    fn test_ownership() {
        let owner = Uuid::new_v4();
        let resume = Resume::create(
            Uuid::new_v4(),
            owner,
            NewResume {
                template: Some("modern".to_string()),
                data: ResumeData::default(),
                version: "1".to_string(),
            },
            Utc::now(),
        )
        .unwrap();
        assert!(resume.ensure_owned_by(owner, "access this resume").is_ok());
        assert_eq!(
            resume
                .ensure_owned_by(Uuid::new_v4(), "access this resume")
                .unwrap_err()
                .to_string(),
            "Not authorized to access this resume"
        );
    }
}
