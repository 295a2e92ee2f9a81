//! Resume handlers. Only the owning student may read or change a resume.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::get,
    Router,
};

use common::AppResult;
use domain::{parse_id, NewResume, Resume, ResumeUpdate, UserRole};

use super::MessageResponse;
use crate::extractors::JsonBody;
use crate::middleware::{require_role, CurrentUser};
use crate::state::AppState;

/// Create resume routes
pub fn resume_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_resumes).post(create_resume))
        .route(
            "/:id",
            get(get_resume).put(update_resume).delete(delete_resume),
        )
}

/// The caller's resumes
#[utoipa::path(
    get,
    path = "/api/resumes",
    tag = "Resumes",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Resumes", body = Vec<Resume>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Students only"),
        (status = 404, description = "Student profile not found")
    )
)]
pub async fn list_resumes(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Resume>>> {
    require_role(&current_user, &[UserRole::Student])?;
    let resumes = state.services.resumes.list(current_user.id).await?;
    Ok(Json(resumes))
}

#[utoipa::path(
    get,
    path = "/api/resumes/{id}",
    tag = "Resumes",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Resume ID")),
    responses(
        (status = 200, description = "Resume", body = Resume),
        (status = 401, description = "Unauthorized or not the owner"),
        (status = 403, description = "Students only"),
        (status = 404, description = "Resume not found")
    )
)]
pub async fn get_resume(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Resume>> {
    require_role(&current_user, &[UserRole::Student])?;
    let id = parse_id(&id, "resume")?;
    let resume = state.services.resumes.get(current_user.id, id).await?;
    Ok(Json(resume))
}

#[utoipa::path(
    post,
    path = "/api/resumes",
    tag = "Resumes",
    security(("bearer_auth" = [])),
    request_body = NewResume,
    responses(
        (status = 200, description = "Created resume", body = Resume),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Students only"),
        (status = 404, description = "Student profile not found")
    )
)]
pub async fn create_resume(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewResume>,
) -> AppResult<Json<Resume>> {
    require_role(&current_user, &[UserRole::Student])?;
    let resume = state.services.resumes.create(current_user.id, payload).await?;
    Ok(Json(resume))
}

#[utoipa::path(
    put,
    path = "/api/resumes/{id}",
    tag = "Resumes",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Resume ID")),
    request_body = ResumeUpdate,
    responses(
        (status = 200, description = "Updated resume", body = Resume),
        (status = 401, description = "Unauthorized or not the owner"),
        (status = 403, description = "Students only"),
        (status = 404, description = "Resume not found")
    )
)]
pub async fn update_resume(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<ResumeUpdate>,
) -> AppResult<Json<Resume>> {
    require_role(&current_user, &[UserRole::Student])?;
    let id = parse_id(&id, "resume")?;
    let resume = state
        .services
        .resumes
        .update(current_user.id, id, payload)
        .await?;
    Ok(Json(resume))
}

#[utoipa::path(
    delete,
    path = "/api/resumes/{id}",
    tag = "Resumes",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Resume ID")),
    responses(
        (status = 200, description = "Resume deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized or not the owner"),
        (status = 403, description = "Students only"),
        (status = 404, description = "Resume not found")
    )
)]
pub async fn delete_resume(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    require_role(&current_user, &[UserRole::Student])?;
    let id = parse_id(&id, "resume")?;
    state.services.resumes.delete(current_user.id, id).await?;
    Ok(Json(MessageResponse::new("Resume deleted")))
}
