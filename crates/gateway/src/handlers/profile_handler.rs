//! Student profile, application and job search handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use common::AppResult;
use domain::{
    parse_id, ApplicationUpdate, ExamListing, JobPage, JobSearchQuery, StudentProfile,
    StudentProfileUpdate, StudentProfileView, UserRole,
};

use crate::extractors::JsonBody;
use crate::middleware::{require_role, CurrentUser};
use crate::state::AppState;

/// Application status or exam change. A TPO names the student profile.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationUpdateRequest {
    #[serde(flatten)]
    pub update: ApplicationUpdate,
    /// Target student profile, required for TPO callers
    pub student_id: Option<Uuid>,
}

/// Create student profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_my_profile).put(update_my_profile))
        .route("/apply/:job_id", post(apply_to_job))
        .route("/exams", get(upcoming_exams))
        .route("/application/:application_id", put(update_application))
        .route("/jobs", get(available_jobs))
}

/// Get the caller's student profile
#[utoipa::path(
    get,
    path = "/api/profile/me",
    tag = "Profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Student profile with name and email", body = StudentProfileView),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Students only"),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn get_my_profile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<StudentProfileView>> {
    require_role(&current_user, &[UserRole::Student])?;
    let profile = state.services.profiles.student_profile(current_user.id).await?;
    Ok(Json(profile))
}

/// Replace the supplied sections of the caller's student profile
#[utoipa::path(
    put,
    path = "/api/profile/me",
    tag = "Profile",
    security(("bearer_auth" = [])),
    request_body = StudentProfileUpdate,
    responses(
        (status = 200, description = "Updated profile", body = StudentProfileView),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Students only"),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn update_my_profile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<StudentProfileUpdate>,
) -> AppResult<Json<StudentProfileView>> {
    require_role(&current_user, &[UserRole::Student])?;
    let profile = state
        .services
        .profiles
        .update_student_profile(current_user.id, payload)
        .await?;
    Ok(Json(profile))
}

/// Apply to a job
#[utoipa::path(
    post,
    path = "/api/profile/apply/{job_id}",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(("job_id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Profile with the new application", body = StudentProfile),
        (status = 400, description = "Already applied or malformed ID"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Students only"),
        (status = 404, description = "Student profile or job not found")
    )
)]
pub async fn apply_to_job(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> AppResult<Json<StudentProfile>> {
    require_role(&current_user, &[UserRole::Student])?;
    let job_id = parse_id(&job_id, "job")?;
    let profile = state
        .services
        .applications
        .apply(current_user.id, job_id)
        .await?;
    Ok(Json(profile))
}

/// Upcoming exams with job title and company name, soonest first
#[utoipa::path(
    get,
    path = "/api/profile/exams",
    tag = "Applications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Upcoming exams", body = Vec<ExamListing>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Students only"),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn upcoming_exams(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ExamListing>>> {
    require_role(&current_user, &[UserRole::Student])?;
    let exams = state
        .services
        .applications
        .upcoming_exams(current_user.id)
        .await?;
    Ok(Json(exams))
}

/// Update an application's status or exam schedule
#[utoipa::path(
    put,
    path = "/api/profile/application/{application_id}",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(("application_id" = Uuid, Path, description = "Application ID")),
    request_body = ApplicationUpdateRequest,
    responses(
        (status = 200, description = "Profile with the updated application", body = StudentProfile),
        (status = 400, description = "Missing student ID for TPO callers"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Students and TPOs only"),
        (status = 404, description = "Profile or application not found")
    )
)]
pub async fn update_application(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(application_id): Path<String>,
    JsonBody(payload): JsonBody<ApplicationUpdateRequest>,
) -> AppResult<Json<StudentProfile>> {
    require_role(&current_user, &[UserRole::Student, UserRole::Tpo])?;
    let application_id = parse_id(&application_id, "application")?;
    let profile = state
        .services
        .applications
        .update_application(
            current_user.actor(),
            application_id,
            payload.student_id,
            payload.update,
        )
        .await?;
    Ok(Json(profile))
}

/// Open jobs the caller is eligible for and has not applied to
#[utoipa::path(
    get,
    path = "/api/profile/jobs",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(JobSearchQuery),
    responses(
        (status = 200, description = "A page of eligible jobs", body = JobPage),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Students only"),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn available_jobs(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<JobSearchQuery>,
) -> AppResult<Json<JobPage>> {
    require_role(&current_user, &[UserRole::Student])?;
    let page = state
        .services
        .applications
        .available_jobs(current_user.id, query)
        .await?;
    Ok(Json(page))
}
