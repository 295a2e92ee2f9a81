//! HTTP request handlers, one module per resource group.

pub mod announcement_handler;
pub mod auth_handler;
pub mod company_handler;
pub mod health_handler;
pub mod offer_handler;
pub mod profile_handler;
pub mod resume_handler;
pub mod tpo_handler;

pub use announcement_handler::announcement_routes;
pub use auth_handler::auth_routes;
pub use company_handler::company_routes;
pub use health_handler::{health_check, root};
pub use offer_handler::offer_routes;
pub use profile_handler::profile_routes;
pub use resume_handler::resume_routes;
pub use tpo_handler::tpo_routes;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Digits with an optional leading `+`, spaces or dashes between groups.
pub(crate) static CONTACT_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 \-]{6,18}[0-9]$").expect("valid contact regex"));

/// Plain acknowledgement body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Job deleted")]
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}
