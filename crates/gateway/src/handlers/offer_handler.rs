//! Offer handlers.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{parse_id, NewOffer, OfferDecision, OfferView, UserRole};

use crate::extractors::{JsonBody, ValidatedJson};
use crate::middleware::{require_role, CurrentUser};
use crate::state::AppState;

/// A student's answer to a pending offer
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OfferStatusRequest {
    /// `Accepted` or `Rejected`
    #[validate(length(min = 1, message = "Status is required"))]
    #[schema(example = "Accepted")]
    pub status: String,
}

/// Create offer routes
pub fn offer_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_offer))
        .route("/company", get(company_offers))
        .route("/student/me", get(my_offers))
        .route("/student/:student_id", get(student_offers))
        .route("/:id/status", put(respond_to_offer))
        .route("/:id", get(get_offer))
}

/// Issue an offer for one of the caller's jobs
#[utoipa::path(
    post,
    path = "/api/offers",
    tag = "Offers",
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

/// Offers issued by the caller's company
#[utoipa::path(
    get,
    path = "/api/offers/company",
    tag = "Offers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Company offers", body = Vec<OfferView>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Companies only")
    )
)]
pub async fn company_offers(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<OfferView>>> {
    require_role(&current_user, &[UserRole::Company])?;
    let offers = state.services.offers.company_offers(current_user.id).await?;
    Ok(Json(offers))
}

/// Offers made to the calling student
#[utoipa::path(
    get,
    path = "/api/offers/student/me",
    tag = "Offers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's offers", body = Vec<OfferView>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Students only"),
        (status = 404, description = "Student profile not found")
    )
)]
pub async fn my_offers(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<OfferView>>> {
    require_role(&current_user, &[UserRole::Student])?;
    let offers = state.services.offers.my_offers(current_user.id).await?;
    Ok(Json(offers))
}

/// Offers made to a student profile
#[utoipa::path(
    get,
    path = "/api/offers/student/{student_id}",
    tag = "Offers",
    security(("bearer_auth" = [])),
    params(("student_id" = Uuid, Path, description = "Student profile ID")),
    responses(
        (status = 200, description = "The student's offers", body = Vec<OfferView>),
        (status = 400, description = "Malformed ID"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "TPO only")
    )
)]
pub async fn student_offers(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> AppResult<Json<Vec<OfferView>>> {
    require_role(&current_user, &[UserRole::Tpo])?;
    let student_id = parse_id(&student_id, "student")?;
    let offers = state.services.offers.student_offers(student_id).await?;
    Ok(Json(offers))
}

/// Accept or reject a pending offer
#[utoipa::path(
    put,
    path = "/api/offers/{id}/status",
    tag = "Offers",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Offer ID")),
    request_body = OfferStatusRequest,
    responses(
        (status = 200, description = "Answered offer", body = OfferView),
        (status = 400, description = "Invalid status or offer already answered"),
        (status = 401, description = "Unauthorized or not the recipient"),
        (status = 403, description = "Students only"),
        (status = 404, description = "Offer not found")
    )
)]
pub async fn respond_to_offer(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<OfferStatusRequest>,
) -> AppResult<Json<OfferView>> {
    require_role(&current_user, &[UserRole::Student])?;
    let id = parse_id(&id, "offer")?;
    let decision: OfferDecision = payload.status.trim().parse()?;
    let offer = state
        .services
        .offers
        .respond(current_user.id, id, decision)
        .await?;
    Ok(Json(offer))
}

/// One offer, visible to its company, its student and any TPO
#[utoipa::path(
    get,
    path = "/api/offers/{id}",
    tag = "Offers",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Offer ID")),
    responses(
        (status = 200, description = "Offer", body = OfferView),
        (status = 400, description = "Malformed ID"),
        (status = 401, description = "Unauthorized or not a party to the offer"),
        (status = 404, description = "Offer not found")
    )
)]
pub async fn get_offer(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<OfferView>> {
    let id = parse_id(&id, "offer")?;
    let offer = state.services.offers.offer(current_user.actor(), id).await?;
    Ok(Json(offer))
}
