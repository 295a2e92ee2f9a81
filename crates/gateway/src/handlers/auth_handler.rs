//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{RegisterUser, RoleDetails, UserRole};

use super::CONTACT_NUMBER;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Registration request. Role-specific fields are required per role.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Asha Rao")]
    pub name: String,
    #[validate(email(message = "Please include a valid email"))]
    #[schema(example = "asha@college.edu")]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// One of `student`, `company`, `tpo`
    #[schema(example = "student")]
    pub role: String,
    pub enrollment_number: Option<String>,
    pub branch: Option<String>,
    pub graduation_year: Option<i32>,
    pub hr_name: Option<String>,
    #[validate(regex(path = *CONTACT_NUMBER, message = "Please include a valid contact number"))]
    pub contact_number: Option<String>,
    pub institute_name: Option<String>,
}

impl RegisterRequest {
    fn into_register_user(self) -> AppResult<RegisterUser> {
        let role: UserRole = self.role.trim().parse()?;
        let details = match role {
            UserRole::Student => RoleDetails::Student {
                enrollment_number: self.enrollment_number.unwrap_or_default(),
                branch: self.branch.unwrap_or_default(),
                graduation_year: self.graduation_year,
            },
            UserRole::Company => RoleDetails::Company {
                hr_name: self.hr_name.unwrap_or_default(),
                contact_number: self.contact_number.unwrap_or_default(),
            },
            UserRole::Tpo => RoleDetails::Tpo {
                institute_name: self.institute_name.unwrap_or_default(),
                contact_number: self.contact_number.unwrap_or_default(),
            },
        };

        Ok(RegisterUser {
            name: self.name,
            email: self.email,
            password: self.password,
            details,
        })
    }
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Please include a valid email"))]
    #[schema(example = "asha@college.edu")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Bearer token issued on register and login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a user and their role profile
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registered and signed in", body = TokenResponse),
        (status = 400, description = "Validation error or user already exists"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Json<TokenResponse>> {
    let input = payload.into_register_user()?;
    let token = state.services.auth.register(input).await?;
    Ok(Json(TokenResponse { token: token.token }))
}

/// Log in and receive a bearer token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Invalid credentials"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .services
        .auth
        .login(&payload.email, &payload.password)
        .await?;
    Ok(Json(TokenResponse { token: token.token }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(role: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Infosys".to_string(),
            email: "hr@infosys.com".to_string(),
            password: "SecurePass123!".to_string(),
            role: role.to_string(),
            enrollment_number: None,
            branch: None,
            graduation_year: None,
            hr_name: Some("Ravi".to_string()),
            contact_number: Some("+91 98765 43210".to_string()),
            institute_name: None,
        }
    }

    #[test]
    fn test_company_details_built_from_role() {
        let user = request("company").into_register_user().unwrap();
        assert_eq!(
            user.details,
            RoleDetails::Company {
                hr_name: "Ravi".to_string(),
                contact_number: "+91 98765 43210".to_string(),
            }
        );
        assert!(request("company").validate().is_ok());
    }

    #[test]
    fn test_unknown_role_rejected() {
        let err = request("admin").into_register_user().unwrap_err();
        assert_eq!(err.user_message(), "Invalid user role");
    }

    #[test]
    fn test_contact_number_pattern() {
        let mut bad = request("company");
        bad.contact_number = Some("call me".to_string());
        assert!(bad.validate().is_err());
    }
}
