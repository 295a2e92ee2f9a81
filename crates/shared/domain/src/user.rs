//! User domain entity and role-specific identity data.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{ROLE_COMPANY, ROLE_STUDENT, ROLE_TPO};
use crate::error::{DomainError, DomainResult};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Company,
    Tpo,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => ROLE_STUDENT,
            UserRole::Company => ROLE_COMPANY,
            UserRole::Tpo => ROLE_TPO,
        }
    }

    /// TPO users administer every other record
    pub fn is_tpo(&self) -> bool {
        matches!(self, UserRole::Tpo)
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_STUDENT => Ok(UserRole::Student),
            ROLE_COMPANY => Ok(UserRole::Company),
            ROLE_TPO => Ok(UserRole::Tpo),
            _ => Err(DomainError::validation("Invalid user role")),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role-specific identity fields, discriminated by the `role` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RoleDetails {
    Student {
        #[serde(rename = "enrollmentNumber")]
        enrollment_number: String,
        branch: String,
        #[serde(rename = "graduationYear", default)]
        graduation_year: Option<i32>,
    },
    Company {
        #[serde(rename = "hrName")]
        hr_name: String,
        #[serde(rename = "contactNumber")]
        contact_number: String,
    },
    Tpo {
        #[serde(rename = "instituteName")]
        institute_name: String,
        #[serde(rename = "contactNumber")]
        contact_number: String,
    },
}

impl RoleDetails {
    pub fn role(&self) -> UserRole {
        match self {
            RoleDetails::Student { .. } => UserRole::Student,
            RoleDetails::Company { .. } => UserRole::Company,
            RoleDetails::Tpo { .. } => UserRole::Tpo,
        }
    }

    /// Reject blank required fields for the variant.
    pub fn validate(&self) -> DomainResult<()> {
        let required: Vec<(&str, &str)> = match self {
            RoleDetails::Student {
                enrollment_number,
                branch,
                ..
            } => vec![
                ("Enrollment number", enrollment_number.as_str()),
                ("Branch", branch.as_str()),
            ],
            RoleDetails::Company {
                hr_name,
                contact_number,
            } => vec![
                ("HR name", hr_name.as_str()),
                ("Contact number", contact_number.as_str()),
            ],
            RoleDetails::Tpo {
                institute_name,
                contact_number,
            } => vec![
                ("Institute name", institute_name.as_str()),
                ("Contact number", contact_number.as_str()),
            ],
        };

        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{} is required", label)));
            }
        }
        Ok(())
    }

    /// Student branch, if this is a student.
    pub fn branch(&self) -> Option<&str> {
        match self {
            RoleDetails::Student { branch, .. } => Some(branch.as_str()),
            _ => None,
        }
    }

    /// Student graduation year, if known.
    pub fn graduation_year(&self) -> Option<i32> {
        match self {
            RoleDetails::Student {
                graduation_year, ..
            } => *graduation_year,
            _ => None,
        }
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    #[serde(flatten)]
    pub details: RoleDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        id: Uuid,
        name: String,
        email: String,
        password_hash: String,
        details: RoleDetails,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            details,
            created_at: now,
            updated_at: now,
        }
    }

    /// Role is derived from the details variant and never changes.
    pub fn role(&self) -> UserRole {
        self.details.role()
    }

    /// Replace HR contact fields on a company user. Blank values are ignored.
    pub fn update_hr_info(
        &mut self,
        hr_name: Option<String>,
        contact_number: Option<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        match &mut self.details {
            RoleDetails::Company {
                hr_name: current_name,
                contact_number: current_contact,
            } => {
                replace_if_present(current_name, hr_name);
                replace_if_present(current_contact, contact_number);
            }
            _ => return Err(DomainError::Forbidden),
        }
        self.updated_at = now;
        Ok(())
    }

    /// Replace TPO institute fields. Blank values are ignored.
    pub fn update_tpo_info(
        &mut self,
        institute_name: Option<String>,
        contact_number: Option<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        match &mut self.details {
            RoleDetails::Tpo {
                institute_name: current_name,
                contact_number: current_contact,
            } => {
                replace_if_present(current_name, institute_name);
                replace_if_present(current_contact, contact_number);
            }
            _ => return Err(DomainError::Forbidden),
        }
        self.updated_at = now;
        Ok(())
    }
}

fn replace_if_present(slot: &mut String, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        *slot = value;
    }
}

/// Registration input
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub details: RoleDetails,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub details: RoleDetails,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            details: user.details.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            details: user.details,
            created_at: user.created_at,
        }
    }
}

/// `{name, email}` projection used when joining users into other records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserContact {
    pub name: String,
    pub email: String,
}

impl From<&User> for UserContact {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student_details() -> RoleDetails {
        RoleDetails::Student {
            enrollment_number: "EN-001".to_string(),
            branch: "CSE".to_string(),
            graduation_year: Some(2025),
        }
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("tpo".parse::<UserRole>().unwrap(), UserRole::Tpo);
        assert!("admin".parse::<UserRole>().is_err());
        assert_eq!(UserRole::Company.to_string(), "company");
    }

    #[test]
    fn test_role_derived_from_details() {
        let user = User::new(
            Uuid::new_v4(),
            "Asha".to_string(),
            "asha@example.com".to_string(),
            "hash".to_string(),
            student_details(),
            Utc::now(),
        );
        assert_eq!(user.role(), UserRole::Student);
    }

    #[test]
    fn test_validate_requires_fields() {
        let details = RoleDetails::Company {
            hr_name: "  ".to_string(),
            contact_number: "9876543210".to_string(),
        };
        assert_eq!(
            details.validate().unwrap_err().to_string(),
            "HR name is required"
        );
        assert!(student_details().validate().is_ok());
    }

    #[test]
    fn test_serialized_shape_is_flat_and_hides_hash() {
        let user = User::new(
            Uuid::new_v4(),
            "Asha".to_string(),
            "asha@example.com".to_string(),
            "secret-hash".to_string(),
            student_details(),
            Utc::now(),
        );
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "student");
        assert_eq!(json["enrollmentNumber"], "EN-001");
        assert_eq!(json["graduationYear"], 2025);
        assert!(json.get("passwordHash").is_none());
    }

    #[test]
    fn test_update_hr_info_only_for_company() {
        let now = Utc::now();
        let mut company = User::new(
            Uuid::new_v4(),
            "Acme".to_string(),
            "hr@acme.test".to_string(),
            "hash".to_string(),
            RoleDetails::Company {
                hr_name: "Old".to_string(),
                contact_number: "111".to_string(),
            },
            now,
        );
        company
            .update_hr_info(Some("New".to_string()), Some("".to_string()), now)
            .unwrap();
        assert_eq!(
            company.details,
            RoleDetails::Company {
                hr_name: "New".to_string(),
                contact_number: "111".to_string(),
            }
        );

        let mut student = company.clone();
        student.details = student_details();
        assert_eq!(
            student.update_hr_info(None, None, now).unwrap_err(),
            DomainError::Forbidden
        );
    }
}
