//! Announcements broadcast to one or more roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::user::UserRole;

/// Target audience tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Student,
    Company,
    Tpo,
    All,
}

impl Audience {
    pub fn includes(&self, role: UserRole) -> bool {
        match self {
            Audience::All => true,
            Audience::Student => role == UserRole::Student,
            Audience::Company => role == UserRole::Company,
            Audience::Tpo => role == UserRole::Tpo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AnnouncementAttachment {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: Uuid,
    pub target_audience: Vec<Audience>,
    pub is_active: bool,
    pub attachments: Vec<AnnouncementAttachment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Announcement {
    /// Active announcement. An empty audience means everyone.
    pub fn create(
        id: Uuid,
        author: Uuid,
        input: NewAnnouncement,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if input.title.trim().is_empty() || input.content.trim().is_empty() {
            return Err(DomainError::validation("Title and content are required"));
        }

        Ok(Self {
            id,
            title: input.title,
            content: input.content,
            author,
            target_audience: normalize_audience(input.target_audience),
            is_active: true,
            attachments: input.attachments.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn visible_to(&self, role: UserRole) -> bool {
        self.target_audience.iter().any(|a| a.includes(role))
    }

    /// The author and any TPO may modify an announcement.
    pub fn ensure_manageable_by(&self, user_id: Uuid, role: UserRole, action: &str) -> DomainResult<()> {
        if self.author == user_id || role.is_tpo() {
            Ok(())
        } else {
            Err(DomainError::not_authorized(action))
        }
    }

    pub fn apply_update(&mut self, update: AnnouncementUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title.filter(|t| !t.trim().is_empty()) {
            self.title = title;
        }
        if let Some(content) = update.content.filter(|c| !c.trim().is_empty()) {
            self.content = content;
        }
        if let Some(audience) = update.target_audience {
            self.target_audience = normalize_audience(Some(audience));
        }
        if let Some(attachments) = update.attachments {
            self.attachments = attachments;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.updated_at = now;
    }
}

fn normalize_audience(audience: Option<Vec<Audience>>) -> Vec<Audience> {
    let mut out: Vec<Audience> = Vec::new();
    for tag in audience.unwrap_or_default() {
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    if out.is_empty() {
        out.push(Audience::All);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
    pub target_audience: Option<Vec<Audience>>,
    pub attachments: Option<Vec<AnnouncementAttachment>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub target_audience: Option<Vec<Audience>>,
    pub attachments: Option<Vec<AnnouncementAttachment>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuthorSummary {
    pub id: Uuid,
    pub name: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementView {
    #[serde(flatten)]
    pub announcement: Announcement,
    pub author_info: Option<AuthorSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn announcement(audience: Option<Vec<Audience>>) -> Announcement {
        Announcement::create(
            Uuid::new_v4(),
            Uuid::new_v4(),
            NewAnnouncement {
                title: "Drive".to_string(),
                content: "Campus drive on Monday".to_string(),
                target_audience: audience,
                attachments: None,
            },
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_default_audience_is_all() {
        let a = announcement(None);
        assert_eq!(a.target_audience, vec![Audience::All]);
        assert!(a.visible_to(UserRole::Company));
        assert!(a.is_active);
    }

    #[test]
    fn test_targeted_visibility() {
        let a = announcement(Some(vec![Audience::Student, Audience::Student]));
        assert_eq!(a.target_audience, vec![Audience::Student]);
        assert!(a.visible_to(UserRole::Student));
        assert!(!a.visible_to(UserRole::Company));
    }

    #[test]
    fn test_manage_permissions() {
        let a = announcement(None);
        assert!(a.ensure_manageable_by(a.author, UserRole::Student, "update").is_ok());
        assert!(a.ensure_manageable_by(Uuid::new_v4(), UserRole::Tpo, "update").is_ok());
        assert!(a
            .ensure_manageable_by(Uuid::new_v4(), UserRole::Company, "update this announcement")
            .is_err());
    }

    #[test]
    fn test_update_refreshes_timestamp() {
        let mut a = announcement(None);
        let later = a.updated_at + Duration::minutes(5);
        a.apply_update(
            AnnouncementUpdate {
                is_active: Some(false),
                ..Default::default()
            },
            later,
        );
        assert!(!a.is_active);
        assert_eq!(a.updated_at, later);
        assert_eq!(a.title, "Drive");
    }

    #[test]
    fn test_blank_title_rejected() {
        let result = Announcement::create(
            Uuid::new_v4(),
            Uuid::new_v4(),
            NewAnnouncement {
                title: " ".to_string(),
                content: "x".to_string(),
                target_audience: None,
                attachments: None,
            },
            Utc::now(),
        );
        assert!(result.is_err());
    }
}
