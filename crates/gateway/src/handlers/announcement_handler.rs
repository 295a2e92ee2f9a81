//! Announcement handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use common::AppResult;
use domain::{
    parse_id, AnnouncementAttachment, AnnouncementUpdate, AnnouncementView, Audience,
    NewAnnouncement, UserRole,
};

use super::MessageResponse;
use crate::extractors::{JsonBody, ValidatedJson};
use crate::middleware::{require_role, CurrentUser};
use crate::state::AppState;

/// Listing options
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AnnouncementQuery {
    /// Include inactive announcements
    pub show_all: Option<bool>,
}

/// New announcement; the audience defaults to everyone
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnouncementRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Campus drive on Friday")]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    pub target_audience: Option<Vec<Audience>>,
    pub attachments: Option<Vec<AnnouncementAttachment>>,
}

impl From<CreateAnnouncementRequest> for NewAnnouncement {
    fn from(req: CreateAnnouncementRequest) -> Self {
        NewAnnouncement {
            title: req.title,
            content: req.content,
            target_audience: req.target_audience,
            attachments: req.attachments,
        }
    }
}

/// Create announcement routes
pub fn announcement_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_announcements).post(create_announcement))
        .route(
            "/:id",
            get(get_announcement)
                .put(update_announcement)
                .delete(delete_announcement),
        )
}

/// Announcements addressed to the caller's role, newest first
#[utoipa::path(
    get,
    path = "/api/announcements",
    tag = "Announcements",
    security(("bearer_auth" = [])),
    params(AnnouncementQuery),
    responses(
        (status = 200, description = "Visible announcements", body = Vec<AnnouncementView>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_announcements(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<AnnouncementQuery>,
) -> AppResult<Json<Vec<AnnouncementView>>> {
    let announcements = state
        .services
        .announcements
        .list(current_user.actor(), query.show_all.unwrap_or(false))
        .await?;
    Ok(Json(announcements))
}

/// One announcement
#[utoipa::path(
    get,
    path = "/api/announcements/{id}",
    tag = "Announcements",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Announcement ID")),
    responses(
        (status = 200, description = "Announcement", body = AnnouncementView),
        (status = 400, description = "Malformed ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Announcement not found")
    )
)]
pub async fn get_announcement(
    Extension(_current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<AnnouncementView>> {
    let id = parse_id(&id, "announcement")?;
    let announcement = state.services.announcements.get(id).await?;
    Ok(Json(announcement))
}

/// Post an announcement
#[utoipa::path(
    post,
    path = "/api/announcements",
    tag = "Announcements",
    security(("bearer_auth" = [])),
    request_body = CreateAnnouncementRequest,
    responses(
        (status = 200, description = "Created announcement", body = AnnouncementView),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "TPO only")
    )
)]
pub async fn create_announcement(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAnnouncementRequest>,
) -> AppResult<Json<AnnouncementView>> {
    require_role(&current_user, &[UserRole::Tpo])?;
    let announcement = state
        .services
        .announcements
        .create(current_user.actor(), payload.into())
        .await?;
    Ok(Json(announcement))
}

/// Edit an announcement (author or TPO)
#[utoipa::path(
    put,
    path = "/api/announcements/{id}",
    tag = "Announcements",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Announcement ID")),
    request_body = AnnouncementUpdate,
    responses(
        (status = 200, description = "Updated announcement", body = AnnouncementView),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized or not the author"),
        (status = 404, description = "Announcement not found")
    )
)]
pub async fn update_announcement(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<AnnouncementUpdate>,
) -> AppResult<Json<AnnouncementView>> {
    let id = parse_id(&id, "announcement")?;
    let announcement = state
        .services
        .announcements
        .update(current_user.actor(), id, payload)
        .await?;
    Ok(Json(announcement))
}

/// Remove an announcement (author or TPO)
#[utoipa::path(
    delete,
    path = "/api/announcements/{id}",
    tag = "Announcements",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Announcement ID")),
    responses(
        (status = 200, description = "Announcement deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized or not the author"),
        (status = 404, description = "Announcement not found")
    )
)]
pub async fn delete_announcement(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id, "announcement")?;
    state
        .services
        .announcements
        .delete(current_user.actor(), id)
        .await?;
    Ok(Json(MessageResponse::new("Announcement deleted")))
}
