//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// Students apply to jobs and receive offers
pub const ROLE_STUDENT: &str = "student";

/// Companies post jobs and issue offers
pub const ROLE_COMPANY: &str = "company";

/// Training & Placement Officer, the administrator
pub const ROLE_TPO: &str = "tpo";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

// =============================================================================
// Offers
// =============================================================================

/// Annual package (INR) at or above which an offer is "Super Dream"
pub const SUPER_DREAM_THRESHOLD: f64 = 1_800_000.0;

/// Annual package (INR) at or above which an offer is "Dream"
pub const DREAM_THRESHOLD: f64 = 1_000_000.0;

/// Upgrade allowance per student. Stored only, never enforced.
pub const MAX_UPGRADES: u8 = 2;

// =============================================================================
// Listing
// =============================================================================

/// Default page number for paginated listings
pub const DEFAULT_PAGE: u64 = 1;

/// Default page size for paginated listings
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Upper bound on page size
pub const MAX_PAGE_LIMIT: u64 = 100;

// =============================================================================
// Misc
// =============================================================================

/// Exam round label used when none is supplied
pub const DEFAULT_EXAM_ROUND: &str = "Initial";

/// Resume template used when none is supplied
pub const DEFAULT_RESUME_TEMPLATE: &str = "classic";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds_ordered() {
        assert!(SUPER_DREAM_THRESHOLD > DREAM_THRESHOLD);
    }
}
