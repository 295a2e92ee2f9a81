//! Company handlers: postings, profile, dashboard, student search and offers.
//!
//! Every route requires the `company` role.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{
    parse_id, CompanyDashboard, CompanyJobFilter, CompanyJobPage, CompanyProfileUpdate,
    CompanyProfileView, Job, JobUpdate, NewJob, NewOffer, OfferView, PublicStudentProfile,
    StudentSearchQuery, UserResponse, UserRole,
};

use super::{MessageResponse, CONTACT_NUMBER};
use crate::extractors::{JsonBody, ValidatedJson};
use crate::middleware::{require_role, CurrentUser};
use crate::state::AppState;

/// HR contact stored on the company user
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HrInfoRequest {
    #[validate(length(min = 1, message = "HR name cannot be empty"))]
    #[schema(example = "Ravi Kumar")]
    pub hr_name: Option<String>,
    #[validate(regex(path = *CONTACT_NUMBER, message = "Please include a valid contact number"))]
    #[schema(example = "+91 98765 43210")]
    pub contact_number: Option<String>,
}

/// Create company routes
pub fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(my_jobs).post(create_job))
        .route("/jobs/filter", get(filter_jobs))
        .route("/jobs/:job_id", put(update_job).delete(delete_job))
        .route("/profile", get(get_profile).put(update_profile))
        .route("/hr-info", put(update_hr_info))
        .route("/dashboard", get(dashboard))
        .route("/students", get(search_students))
        .route("/students/:id", get(get_student))
        .route("/offers", get(my_offers).post(create_offer))
}

/// Post a job
#[utoipa::path(
    post,
    path = "/api/company/jobs",
    tag = "Company",
    security(("bearer_auth" = [])),
    request_body = NewJob,
    responses(
        (status = 200, description = "Created job", body = Job),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Companies only"),
        (status = 404, description = "Company profile not found")
    )
)]
pub async fn create_job(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewJob>,
) -> AppResult<Json<Job>> {
    require_role(&current_user, &[UserRole::Company])?;
    let job = state.services.jobs.create_job(current_user.id, payload).await?;
    Ok(Json(job))
}

/// The caller's postings, newest first
#[utoipa::path(
    get,
    path = "/api/company/jobs",
    tag = "Company",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Company jobs", body = Vec<Job>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Companies only"),
        (status = 404, description = "Company profile not found")
    )
)]
pub async fn my_jobs(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Job>>> {
    require_role(&current_user, &[UserRole::Company])?;
    let jobs = state.services.jobs.company_jobs(current_user.id).await?;
    Ok(Json(jobs))
}

/// Filter, sort and page the caller's postings with application counts
#[utoipa::path(
    get,
    path = "/api/company/jobs/filter",
    tag = "Company",
    security(("bearer_auth" = [])),
    params(CompanyJobFilter),
    responses(
        (status = 200, description = "A page of jobs with application stats", body = CompanyJobPage),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Companies only"),
        (status = 404, description = "Company profile not found")
    )
)]
pub async fn filter_jobs(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(filter): Query<CompanyJobFilter>,
) -> AppResult<Json<CompanyJobPage>> {
    require_role(&current_user, &[UserRole::Company])?;
    let page = state.services.jobs.filter_jobs(current_user.id, filter).await?;
    Ok(Json(page))
}

/// Update one of the caller's postings
#[utoipa::path(
    put,
    path = "/api/company/jobs/{job_id}",
    tag = "Company",
    security(("bearer_auth" = [])),
    params(("job_id" = Uuid, Path, description = "Job ID")),
    request_body = JobUpdate,
    responses(
        (status = 200, description = "Updated job", body = Job),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized or not the owner"),
        (status = 403, description = "Companies only"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn update_job(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    JsonBody(payload): JsonBody<JobUpdate>,
) -> AppResult<Json<Job>> {
    require_role(&current_user, &[UserRole::Company])?;
    let job_id = parse_id(&job_id, "job")?;
    let job = state
        .services
        .jobs
        .update_job(current_user.id, job_id, payload)
        .await?;
    Ok(Json(job))
}

/// Delete one of the caller's postings
#[utoipa::path(
    delete,
    path = "/api/company/jobs/{job_id}",
    tag = "Company",
    security(("bearer_auth" = [])),
    params(("job_id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized or not the owner"),
        (status = 403, description = "Companies only"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn delete_job(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    require_role(&current_user, &[UserRole::Company])?;
    let job_id = parse_id(&job_id, "job")?;
    state.services.jobs.delete_job(current_user.id, job_id).await?;
    Ok(Json(MessageResponse::new("Job deleted")))
}

/// The caller's company profile
#[utoipa::path(
    get,
    path = "/api/company/profile",
    tag = "Company",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Company profile with contact info", body = CompanyProfileView),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Companies only"),
        (status = 404, description = "Company profile not found")
    )
)]
pub async fn get_profile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<CompanyProfileView>> {
    require_role(&current_user, &[UserRole::Company])?;
    let profile = state.services.profiles.company_profile(current_user.id).await?;
    Ok(Json(profile))
}

/// Replace the supplied fields of the caller's company profile
#[utoipa::path(
    put,
    path = "/api/company/profile",
    tag = "Company",
    security(("bearer_auth" = [])),
    request_body = CompanyProfileUpdate,
    responses(
        (status = 200, description = "Updated profile", body = CompanyProfileView),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Companies only"),
        (status = 404, description = "Company profile not found")
    )
)]
pub async fn update_profile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CompanyProfileUpdate>,
) -> AppResult<Json<CompanyProfileView>> {
    require_role(&current_user, &[UserRole::Company])?;
    let profile = state
        .services
        .profiles
        .update_company_profile(current_user.id, payload)
        .await?;
    Ok(Json(profile))
}

/// Update the HR contact on the company user
#[utoipa::path(
    put,
    path = "/api/company/hr-info",
    tag = "Company",
    security(("bearer_auth" = [])),
    request_body = HrInfoRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Companies only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_hr_info(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<HrInfoRequest>,
) -> AppResult<Json<UserResponse>> {
    require_role(&current_user, &[UserRole::Company])?;
    let user = state
        .services
        .profiles
        .update_hr_info(current_user.id, payload.hr_name, payload.contact_number)
        .await?;
    Ok(Json(user))
}

/// Posting and offer counts for the caller
#[utoipa::path(
    get,
    path = "/api/company/dashboard",
    tag = "Company",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard statistics", body = CompanyDashboard),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Companies only"),
        (status = 404, description = "Company profile not found")
    )
)]
pub async fn dashboard(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<CompanyDashboard>> {
    require_role(&current_user, &[UserRole::Company])?;
    let stats = state.services.jobs.dashboard(current_user.id).await?;
    Ok(Json(stats))
}

/// Search students by skills, branch, CGPA and graduation year
#[utoipa::path(
    get,
    path = "/api/company/students",
    tag = "Company",
    security(("bearer_auth" = [])),
    params(StudentSearchQuery),
    responses(
        (status = 200, description = "Matching students", body = Vec<PublicStudentProfile>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Companies only")
    )
)]
pub async fn search_students(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<StudentSearchQuery>,
) -> AppResult<Json<Vec<PublicStudentProfile>>> {
    require_role(&current_user, &[UserRole::Company])?;
    let students = state.services.profiles.search_students(query).await?;
    Ok(Json(students))
}

/// Public view of one student profile
#[utoipa::path(
    get,
    path = "/api/company/students/{id}",
    tag = "Company",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Student profile ID")),
    responses(
        (status = 200, description = "Student profile", body = PublicStudentProfile),
        (status = 400, description = "Malformed ID"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Companies only"),
        (status = 404, description = "Student profile not found")
    )
)]
pub async fn get_student(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<PublicStudentProfile>> {
    require_role(&current_user, &[UserRole::Company])?;
    let id = parse_id(&id, "student")?;
    let student = state.services.profiles.public_student(id).await?;
    Ok(Json(student))
}

/// Issue an offer for one of the caller's jobs
#[utoipa::path(
    post,
    path = "/api/company/offers",
    tag = "Company",
    security(("bearer_auth" = [])),
    request_body = NewOffer,
    responses(
        (status = 200, description = "Created offer", body = OfferView),
        (status = 400, description = "Duplicate offer or validation error"),
        (status = 401, description = "Unauthorized or not the job owner"),
        (status = 403, description = "Companies only"),
        (status = 404, description = "Job or student not found")
    )
)]
pub async fn create_offer(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewOffer>,
) -> AppResult<Json<OfferView>> {
    require_role(&current_user, &[UserRole::Company])?;
    let offer = state
        .services
        .offers
        .create_offer(current_user.id, payload)
        .await?;
    Ok(Json(offer))
}

/// Offers the caller has issued, newest first
#[utoipa::path(
    get,
    path = "/api/company/offers",
    tag = "Company",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Company offers", body = Vec<OfferView>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Companies only"),
        (status = 404, description = "Company profile not found")
    )
)]
pub async fn my_offers(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<OfferView>>> {
    require_role(&current_user, &[UserRole::Company])?;
    let offers = state.services.offers.company_offers(current_user.id).await?;
    Ok(Json(offers))
}
