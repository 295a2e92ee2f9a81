//! Authentication service: registration, login and token verification.
//!
//! Uses the domain `Password` value object for hashing.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, JwtConfig};
use domain::{CompanyProfile, Password, RegisterUser, RoleDetails, StudentProfile, User, UserRole};

use super::Actor;
use crate::repository::{CompanyProfileRepository, StudentProfileRepository, UserRepository};

/// Never a valid PHC string, so verification against it always fails.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn actor(&self) -> Actor {
        Actor::new(self.sub, self.role)
    }
}

/// Returned by register and login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthToken {
    pub token: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create the user and its role profile, then sign them in.
    async fn register(&self, input: RegisterUser) -> AppResult<AuthToken>;

    async fn login(&self, email: &str, password: &str) -> AppResult<AuthToken>;

    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Repository-backed `AuthService`
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    students: Arc<dyn StudentProfileRepository>,
    companies: Arc<dyn CompanyProfileRepository>,
    jwt: JwtConfig,
}

impl Authenticator {
    pub fn new(
        users: Arc<dyn UserRepository>,
        students: Arc<dyn StudentProfileRepository>,
        companies: Arc<dyn CompanyProfileRepository>,
        jwt: JwtConfig,
    ) -> Self {
        Self {
            users,
            students,
            companies,
            jwt,
        }
    }

    fn generate_token(&self, user: &User) -> AppResult<AuthToken> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.jwt.expiration_hours);

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt.secret_bytes()),
        )?;

        Ok(AuthToken { token })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, input: RegisterUser) -> AppResult<AuthToken> {
        input.details.validate()?;
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("Name is required"));
        }

        let email = normalize_email(&input.email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("User"));
        }

        let password_hash = Password::new(&input.password)?.into_string();
        let now = Utc::now();
        let user = self
            .users
            .create(User::new(
                Uuid::new_v4(),
                name,
                email,
                password_hash,
                input.details,
                now,
            ))
            .await?;

        match &user.details {
            RoleDetails::Student { .. } => {
                self.students
                    .create(StudentProfile::new(Uuid::new_v4(), user.id, now))
                    .await?;
            }
            RoleDetails::Company { .. } => {
                self.companies
                    .create(CompanyProfile::new(
                        Uuid::new_v4(),
                        user.id,
                        user.name.clone(),
                        now,
                    ))
                    .await?;
            }
            RoleDetails::Tpo { .. } => {}
        }

        tracing::info!(user_id = %user.id, role = %user.role(), "User registered");
        self.generate_token(&user)
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<AuthToken> {
        let user = self.users.find_by_email(&normalize_email(email)).await?;

        // Verify even for unknown emails so both paths do comparable work.
        let stored = Password::from_hash(
            user.as_ref()
                .map(|u| u.password_hash.clone())
                .unwrap_or_else(|| DUMMY_HASH.to_string()),
        );
        let password_valid = stored.verify(password);

        match user {
            Some(user) if password_valid => self.generate_token(&user),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt.secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        MockCompanyProfileRepository, MockStudentProfileRepository, MockUserRepository,
    };

    fn jwt() -> JwtConfig {
        JwtConfig::new("a-test-secret-that-is-long-enough-123".to_string(), 1).unwrap()
    }

    fn student_details() -> RoleDetails {
        RoleDetails::Student {
            enrollment_number: "EN001".to_string(),
            branch: "CSE".to_string(),
            graduation_year: Some(2025),
        }
    }

    fn register_input(details: RoleDetails) -> RegisterUser {
        RegisterUser {
            name: "Asha".to_string(),
            email: "Asha@Example.com ".to_string(),
            password: "password123".to_string(),
            details,
        }
    }

    fn service(
        users: MockUserRepository,
        students: MockStudentProfileRepository,
        companies: MockCompanyProfileRepository,
    ) -> Authenticator {
        Authenticator::new(Arc::new(users), Arc::new(students), Arc::new(companies), jwt())
    }

    #[tokio::test]
    async fn test_register_student_creates_profile() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .withf(|email| email == "asha@example.com")
            .returning(|_| Ok(None));
        users.expect_create().returning(|user| Ok(user));

        let mut students = MockStudentProfileRepository::new();
        students.expect_create().times(1).returning(|p| Ok(p));

        let mut companies = MockCompanyProfileRepository::new();
        companies.expect_create().never();

        let auth = service(users, students, companies);
        let token = auth.register(register_input(student_details())).await.unwrap();

        let claims = auth.verify_token(&token.token).unwrap();
        assert_eq!(claims.email, "asha@example.com");
        assert_eq!(claims.role, UserRole::Student);
    }

    #[tokio::test]
    async fn test_register_company_uses_name_for_profile() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users.expect_create().returning(|user| Ok(user));

        let mut companies = MockCompanyProfileRepository::new();
        companies
            .expect_create()
            .withf(|profile| profile.company_name == "Asha")
            .times(1)
            .returning(|p| Ok(p));

        let auth = service(users, MockStudentProfileRepository::new(), companies);
        let details = RoleDetails::Company {
            hr_name: "Ravi".to_string(),
            contact_number: "9999999999".to_string(),
        };
        assert!(auth.register(register_input(details)).await.is_ok());
    }

    #[tokio::test]
    async fn test_register_existing_email() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| {
            Ok(Some(User::new(
                Uuid::new_v4(),
                "Other".to_string(),
                "asha@example.com".to_string(),
                String::new(),
                student_details(),
                Utc::now(),
            )))
        });
        users.expect_create().never();

        let auth = service(
            users,
            MockStudentProfileRepository::new(),
            MockCompanyProfileRepository::new(),
        );
        let err = auth.register(register_input(student_details())).await.unwrap_err();
        assert_eq!(err.user_message(), "User already exists");
    }

    #[tokio::test]
    async fn test_register_missing_role_fields() {
        let auth = service(
            MockUserRepository::new(),
            MockStudentProfileRepository::new(),
            MockCompanyProfileRepository::new(),
        );
        let details = RoleDetails::Tpo {
            institute_name: String::new(),
            contact_number: "123".to_string(),
        };
        let err = auth.register(register_input(details)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let auth = service(
            users,
            MockStudentProfileRepository::new(),
            MockCompanyProfileRepository::new(),
        );
        let err = auth.login("nobody@example.com", "password123").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_checks_password() {
        let hash = Password::new("password123").unwrap().into_string();
        let user = User::new(
            Uuid::new_v4(),
            "Asha".to_string(),
            "asha@example.com".to_string(),
            hash,
            student_details(),
            Utc::now(),
        );
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let auth = service(
            users,
            MockStudentProfileRepository::new(),
            MockCompanyProfileRepository::new(),
        );
        assert!(auth.login("asha@example.com", "password123").await.is_ok());
        assert!(matches!(
            auth.login("asha@example.com", "wrong-password").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_foreign_token() {
        let auth = service(
            MockUserRepository::new(),
            MockStudentProfileRepository::new(),
            MockCompanyProfileRepository::new(),
        );
        assert!(matches!(auth.verify_token("not-a-jwt"), Err(AppError::Jwt(_))));
    }
}
