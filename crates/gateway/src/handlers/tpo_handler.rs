//! Placement office handlers. Every route requires the `tpo` role.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{
    parse_id, CompanyProfileView, PlacementStats, PlacementStatus, StudentProfileView,
    UserResponse, UserRole,
};

use super::CONTACT_NUMBER;
use crate::extractors::ValidatedJson;
use crate::middleware::{require_role, CurrentUser};
use crate::state::AppState;

/// TPO profile fields; omitted ones are kept
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TpoProfileRequest {
    #[validate(length(min = 1, message = "Institute name cannot be empty"))]
    #[schema(example = "Government College of Engineering")]
    pub institute_name: Option<String>,
    #[validate(regex(path = *CONTACT_NUMBER, message = "Please include a valid contact number"))]
    pub contact_number: Option<String>,
}

/// Manual placement override
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlacementStatusRequest {
    /// `Placed` or `Not Placed`
    #[validate(length(min = 1, message = "Invalid placement status"))]
    #[schema(example = "Placed")]
    pub placement_status: String,
}

/// Create TPO routes
pub fn tpo_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/students", get(list_students))
        .route("/students/:id", get(get_student))
        .route("/students/:id/placement-status", put(set_placement_status))
        .route("/companies", get(list_companies))
        .route("/companies/:id", get(get_company))
        .route("/statistics", get(statistics))
}

#[utoipa::path(
    get,
    path = "/api/tpo/profile",
    tag = "TPO",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "TPO profile", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "TPO only"),
        (status = 404, description = "TPO profile not found")
    )
)]
pub async fn get_profile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    require_role(&current_user, &[UserRole::Tpo])?;
    let profile = state.services.profiles.tpo_profile(current_user.id).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    put,
    path = "/api/tpo/profile",
    tag = "TPO",
    security(("bearer_auth" = [])),
    request_body = TpoProfileRequest,
    responses(
        (status = 200, description = "Updated TPO profile", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "TPO only"),
        (status = 404, description = "TPO profile not found")
    )
)]
pub async fn update_profile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TpoProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    require_role(&current_user, &[UserRole::Tpo])?;
    let profile = state
        .services
        .profiles
        .update_tpo_profile(current_user.id, payload.institute_name, payload.contact_number)
        .await?;
    Ok(Json(profile))
}

/// Every student profile with name, email and branch
#[utoipa::path(
    get,
    path = "/api/tpo/students",
    tag = "TPO",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Students", body = Vec<StudentProfileView>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "TPO only")
    )
)]
pub async fn list_students(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StudentProfileView>>> {
    require_role(&current_user, &[UserRole::Tpo])?;
    let students = state.services.placement_office.students().await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/tpo/students/{id}",
    tag = "TPO",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Student profile ID")),
    responses(
        (status = 200, description = "Student", body = StudentProfileView),
        (status = 400, description = "Malformed ID"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "TPO only"),
        (status = 404, description = "Student profile not found")
    )
)]
pub async fn get_student(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<StudentProfileView>> {
    require_role(&current_user, &[UserRole::Tpo])?;
    let id = parse_id(&id, "student")?;
    let student = state.services.placement_office.student(id).await?;
    Ok(Json(student))
}

/// Override a student's placement status
#[utoipa::path(
    put,
    path = "/api/tpo/students/{id}/placement-status",
    tag = "TPO",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Student profile ID")),
    request_body = PlacementStatusRequest,
    responses(
        (status = 200, description = "Updated student", body = StudentProfileView),
        (status = 400, description = "Invalid placement status"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "TPO only"),
        (status = 404, description = "Student profile not found")
    )
)]
pub async fn set_placement_status(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<PlacementStatusRequest>,
) -> AppResult<Json<StudentProfileView>> {
    require_role(&current_user, &[UserRole::Tpo])?;
    let id = parse_id(&id, "student")?;
    let status: PlacementStatus = payload.placement_status.trim().parse()?;
    let student = state
        .services
        .placement_office
        .set_placement_status(id, status)
        .await?;
    Ok(Json(student))
}

/// Every company profile with contact info
#[utoipa::path(
    get,
    path = "/api/tpo/companies",
    tag = "TPO",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Companies", body = Vec<CompanyProfileView>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "TPO only")
    )
)]
pub async fn list_companies(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CompanyProfileView>>> {
    require_role(&current_user, &[UserRole::Tpo])?;
    let companies = state.services.placement_office.companies().await?;
    Ok(Json(companies))
}

#[utoipa::path(
    get,
    path = "/api/tpo/companies/{id}",
    tag = "TPO",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Company profile ID")),
    responses(
        (status = 200, description = "Company", body = CompanyProfileView),
        (status = 400, description = "Malformed ID"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "TPO only"),
        (status = 404, description = "Company profile not found")
    )
)]
pub async fn get_company(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CompanyProfileView>> {
    require_role(&current_user, &[UserRole::Tpo])?;
    let id = parse_id(&id, "company")?;
    let company = state.services.placement_office.company(id).await?;
    Ok(Json(company))
}

/// Placement statistics across all students
#[utoipa::path(
    get,
    path = "/api/tpo/statistics",
    tag = "TPO",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Statistics", body = PlacementStats),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "TPO only")
    )
)]
pub async fn statistics(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<PlacementStats>> {
    require_role(&current_user, &[UserRole::Tpo])?;
    let stats = state.services.placement_office.statistics().await?;
    Ok(Json(stats))
}
