//! Offer entity and its status state machine.
//!
//! `Pending` is the only non-terminal state. It moves once, to `Accepted` or
//! `Rejected`, and `response_date` is stamped at that moment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::company::CompanySummary;
use crate::constants::{DREAM_THRESHOLD, SUPER_DREAM_THRESHOLD};
use crate::error::{DomainError, DomainResult};
use crate::job::{Attachment, JobSummary};
use crate::student::StudentSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum OfferStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl OfferStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OfferStatus::Pending)
    }

    /// Only `Pending -> Accepted` and `Pending -> Rejected` are legal.
    pub fn can_transition_to(&self, next: OfferStatus) -> bool {
        matches!(
            (self, next),
            (OfferStatus::Pending, OfferStatus::Accepted)
                | (OfferStatus::Pending, OfferStatus::Rejected)
        )
    }
}

/// A student's response to an offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum OfferDecision {
    Accepted,
    Rejected,
}

impl std::str::FromStr for OfferDecision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Accepted" => Ok(OfferDecision::Accepted),
            "Rejected" => Ok(OfferDecision::Rejected),
            _ => Err(DomainError::validation(
                "Status must be either Accepted or Rejected",
            )),
        }
    }
}

impl From<OfferDecision> for OfferStatus {
    fn from(decision: OfferDecision) -> Self {
        match decision {
            OfferDecision::Accepted => OfferStatus::Accepted,
            OfferDecision::Rejected => OfferStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum OfferTier {
    #[serde(rename = "Tier 1")]
    Tier1,
    #[serde(rename = "Tier 2")]
    Tier2,
    #[serde(rename = "Tier 3")]
    Tier3,
    #[serde(rename = "Super Dream")]
    SuperDream,
    Dream,
    Regular,
}

impl OfferTier {
    /// Bucket an annual package.
    pub fn for_package(package: f64) -> Self {
        if package >= SUPER_DREAM_THRESHOLD {
            OfferTier::SuperDream
        } else if package >= DREAM_THRESHOLD {
            OfferTier::Dream
        } else {
            OfferTier::Regular
        }
    }

    /// An explicit tier wins. Without one, a missing or zero package leaves
    /// the tier unset.
    pub fn resolve(explicit: Option<OfferTier>, package: Option<f64>) -> Option<OfferTier> {
        explicit.or_else(|| {
            package
                .filter(|p| *p != 0.0)
                .map(OfferTier::for_package)
        })
    }
}

/// Offer issued by a company to a student for one job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: Uuid,
    pub job: Uuid,
    pub student: Uuid,
    pub company: Uuid,
    pub package: Option<f64>,
    pub tier: Option<OfferTier>,
    pub status: OfferStatus,
    pub offer_details: Option<String>,
    pub offer_date: DateTime<Utc>,
    pub response_date: Option<DateTime<Utc>>,
    pub joining_date: Option<DateTime<Utc>>,
    pub documents: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Offer {
    /// Issue a pending offer, deriving the tier when none is given.
    pub fn issue(id: Uuid, company: Uuid, input: NewOffer, now: DateTime<Utc>) -> Self {
        Self {
            id,
            job: input.job_id,
            student: input.student_id,
            company,
            package: input.package,
            tier: OfferTier::resolve(input.tier, input.package),
            status: OfferStatus::Pending,
            offer_details: input.offer_details,
            offer_date: now,
            response_date: None,
            joining_date: input.joining_date,
            documents: input.documents.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record the student's decision.
    ///
    /// # Errors
    /// `InvalidState` unless the offer is still pending.
    pub fn respond(&mut self, decision: OfferDecision, now: DateTime<Utc>) -> DomainResult<()> {
        let next = OfferStatus::from(decision);
        if !self.status.can_transition_to(next) {
            return Err(DomainError::invalid_state(
                "Cannot update an offer that is not pending",
            ));
        }
        self.status = next;
        self.response_date = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Fails with `NotAuthorized` unless the offer was made to `student_id`.
    pub fn ensure_addressed_to(&self, student_id: Uuid, action: &str) -> DomainResult<()> {
        if self.student == student_id {
            Ok(())
        } else {
            Err(DomainError::not_authorized(action))
        }
    }
}

/// Input for issuing an offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewOffer {
    pub job_id: Uuid,
    pub student_id: Uuid,
    pub package: Option<f64>,
    pub tier: Option<OfferTier>,
    pub offer_details: Option<String>,
    pub joining_date: Option<DateTime<Utc>>,
    pub documents: Option<Vec<Attachment>>,
}

/// Offer joined with its job, company and student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct OfferView {
    #[serde(flatten)]
    pub offer: Offer,
    pub job_info: Option<JobSummary>,
    pub company_info: Option<CompanySummary>,
    pub student_info: Option<StudentSummary>,
}
