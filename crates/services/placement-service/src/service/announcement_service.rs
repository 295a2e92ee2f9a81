//! Announcement service: the placement office notice board.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{
    Announcement, AnnouncementUpdate, AnnouncementView, AuthorSummary, NewAnnouncement,
};

use super::{distinct, Actor};
use crate::repository::{AnnouncementRepository, UserRepository};

/// Announcement service trait for dependency injection.
#[async_trait]
pub trait AnnouncementService: Send + Sync {
    /// Announcements addressed to the caller's role, newest first. Inactive
    /// ones are included only with `show_all`.
    async fn list(&self, actor: Actor, show_all: bool) -> AppResult<Vec<AnnouncementView>>;

    async fn get(&self, id: Uuid) -> AppResult<AnnouncementView>;

    async fn create(&self, actor: Actor, input: NewAnnouncement) -> AppResult<AnnouncementView>;

    async fn update(
        &self,
        actor: Actor,
        id: Uuid,
        update: AnnouncementUpdate,
    ) -> AppResult<AnnouncementView>;

    async fn delete(&self, actor: Actor, id: Uuid) -> AppResult<()>;
}

/// Repository-backed `AnnouncementService`
pub struct NoticeBoard {
    announcements: Arc<dyn AnnouncementRepository>,
    users: Arc<dyn UserRepository>,
}

impl NoticeBoard {
    pub fn new(
        announcements: Arc<dyn AnnouncementRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            announcements,
            users,
        }
    }

    async fn find(&self, id: Uuid) -> AppResult<Announcement> {
        self.announcements
            .find_by_id(id)
            .await?
            .ok_or_not_found("Announcement")
    }

    async fn with_authors(
        &self,
        announcements: Vec<Announcement>,
    ) -> AppResult<Vec<AnnouncementView>> {
        if announcements.is_empty() {
            return Ok(Vec::new());
        }

        let authors: HashMap<Uuid, AuthorSummary> = self
            .users
            .find_many(distinct(announcements.iter().map(|a| a.author)))
            .await?
            .into_iter()
            .map(|user| {
                let summary = AuthorSummary {
                    id: user.id,
                    role: user.role(),
                    name: user.name,
                };
                (summary.id, summary)
            })
            .collect();

        Ok(announcements
            .into_iter()
            .map(|announcement| AnnouncementView {
                author_info: authors.get(&announcement.author).cloned(),
                announcement,
            })
            .collect())
    }

    async fn view(&self, announcement: Announcement) -> AppResult<AnnouncementView> {
        self.with_authors(vec![announcement])
            .await?
            .pop()
            .ok_or_not_found("Announcement")
    }
}

#[async_trait]
impl AnnouncementService for NoticeBoard {
    async fn list(&self, actor: Actor, show_all: bool) -> AppResult<Vec<AnnouncementView>> {
        let visible = self
            .announcements
            .list()
            .await?
            .into_iter()
            .filter(|a| a.visible_to(actor.role))
            .filter(|a| show_all || a.is_active)
            .collect();
        self.with_authors(visible).await
    }

    async fn get(&self, id: Uuid) -> AppResult<AnnouncementView> {
        let announcement = self.find(id).await?;
        self.view(announcement).await
    }

    async fn create(&self, actor: Actor, input: NewAnnouncement) -> AppResult<AnnouncementView> {
        let announcement = Announcement::create(Uuid::new_v4(), actor.id, input, Utc::now())?;
        let announcement = self.announcements.create(announcement).await?;

        tracing::info!(announcement_id = %announcement.id, author = %actor.id, "Announcement posted");
        self.view(announcement).await
    }

    async fn update(
        &self,
        actor: Actor,
        id: Uuid,
        update: AnnouncementUpdate,
    ) -> AppResult<AnnouncementView> {
        let mut announcement = self.find(id).await?;
        announcement.ensure_manageable_by(actor.id, actor.role, "update this announcement")?;
        announcement.apply_update(update, Utc::now());

        let announcement = self.announcements.update(announcement).await?;
        self.view(announcement).await
    }

    async fn delete(&self, actor: Actor, id: Uuid) -> AppResult<()> {
        let announcement = self.find(id).await?;
        announcement.ensure_manageable_by(actor.id, actor.role, "delete this announcement")?;
        self.announcements.delete(id).await?;

        tracing::info!(announcement_id = %id, "Announcement removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockAnnouncementRepository, MockUserRepository};
    use crate::service::fixtures;
    use common::AppError;
    use domain::{Audience, UserRole};

    fn notice(author: Uuid, title: &str, audience: Option<Vec<Audience>>) -> Announcement {
        Announcement::create(
            Uuid::new_v4(),
            author,
            NewAnnouncement {
                title: title.to_string(),
                content: format!("{title} details"),
                target_audience: audience,
                attachments: None,
            },
            Utc::now(),
        )
        .unwrap()
    }

    fn board(announcements: MockAnnouncementRepository, users: MockUserRepository) -> NoticeBoard {
        NoticeBoard::new(Arc::new(announcements), Arc::new(users))
    }

    fn tpo_directory() -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users.expect_find_many().returning(|ids| {
            Ok(ids.into_iter().map(fixtures::tpo_user).collect())
        });
        users
    }

    #[tokio::test]
    async fn test_list_filters_audience_and_inactive() {
        let author = Uuid::new_v4();
        let everyone = notice(author, "Welcome", None);
        let companies_only = notice(author, "Company briefing", Some(vec![Audience::Company]));
        let mut retired = notice(author, "Old drive", Some(vec![Audience::Student]));
        retired.is_active = false;

        let mut announcements = MockAnnouncementRepository::new();
        let all = vec![everyone, companies_only, retired];
        announcements
            .expect_list()
            .returning(move || Ok(all.clone()));

        let board = board(announcements, tpo_directory());
        let student = Actor::new(Uuid::new_v4(), UserRole::Student);

        let active = board.list(student, false).await.unwrap();
        let titles: Vec<_> = active.iter().map(|v| v.announcement.title.as_str()).collect();
        assert_eq!(titles, vec!["Welcome"]);

        let everything = board.list(student, true).await.unwrap();
        assert_eq!(everything.len(), 2);
        assert_eq!(
            everything[0].author_info.as_ref().map(|a| a.role),
            Some(UserRole::Tpo)
        );
    }

    #[tokio::test]
    async fn test_create_defaults_to_everyone() {
        let mut announcements = MockAnnouncementRepository::new();
        announcements.expect_create().returning(|a| Ok(a));

        let view = board(announcements, tpo_directory())
            .create(
                Actor::new(Uuid::new_v4(), UserRole::Tpo),
                NewAnnouncement {
                    title: "Drive".to_string(),
                    content: "Tomorrow".to_string(),
                    target_audience: None,
                    attachments: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(view.announcement.target_audience, vec![Audience::All]);
        assert!(view.announcement.is_active);
    }

    #[tokio::test]
    async fn test_blank_title_rejected() {
        let mut announcements = MockAnnouncementRepository::new();
        announcements.expect_create().never();

        let err = board(announcements, MockUserRepository::new())
            .create(
                Actor::new(Uuid::new_v4(), UserRole::Tpo),
                NewAnnouncement {
                    title: "  ".to_string(),
                    content: "body".to_string(),
                    target_audience: None,
                    attachments: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_only_author_or_tpo_may_delete() {
        let author = Uuid::new_v4();
        let existing = notice(author, "Drive", None);
        let id = existing.id;

        let mut announcements = MockAnnouncementRepository::new();
        announcements
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        announcements.expect_delete().times(1).returning(|_| Ok(()));
        let board = board(announcements, MockUserRepository::new());

        let err = board
            .delete(Actor::new(Uuid::new_v4(), UserRole::Student), id)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Not authorized to delete this announcement");

        board
            .delete(Actor::new(Uuid::new_v4(), UserRole::Tpo), id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_refreshes_timestamp() {
        let author = Uuid::new_v4();
        let existing = notice(author, "Drive", None);
        let (id, created) = (existing.id, existing.updated_at);

        let mut announcements = MockAnnouncementRepository::new();
        announcements
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        announcements.expect_update().returning(|a| Ok(a));

        let view = board(announcements, tpo_directory())
            .update(
                Actor::new(author, UserRole::Tpo),
                id,
                AnnouncementUpdate {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!view.announcement.is_active);
        assert!(view.announcement.updated_at >= created);
    }

    #[tokio::test]
    async fn test_missing_announcement() {
        let mut announcements = MockAnnouncementRepository::new();
        announcements.expect_find_by_id().returning(|_| Ok(None));

        let err = board(announcements, MockUserRepository::new())
            .get(Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Announcement not found");
    }
}
