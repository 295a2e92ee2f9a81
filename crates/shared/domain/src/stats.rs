//! Read-side aggregation for the placement office and company dashboards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::company::CompanyProfile;
use crate::job::{Job, JobStatus};
use crate::offer::{Offer, OfferStatus};
use crate::student::{PlacementStatus, StudentProfile};

/// `part / total` as a percentage rounded to two decimals; 0 when `total` is 0.
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = part as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

/// Percentage label such as `"66.67%"`; `"0%"` when `total` is 0.
pub fn percentage_label(part: u64, total: u64) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.2}%", percentage(part, total))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct OfferDistribution {
    pub with_no_offers: u64,
    pub with_one_offer: u64,
    pub with_multiple_offers: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PlacementStats {
    pub total_students: u64,
    pub placed_students: u64,
    pub unplaced_students: u64,
    pub placement_percentage: f64,
    pub offer_stats: OfferDistribution,
    /// Placed students per branch
    pub branch_wise_stats: BTreeMap<String, u64>,
}

/// Placement statistics over every student profile, each paired with the
/// owning user's branch when known.
pub fn placement_stats<'a, I>(students: I) -> PlacementStats
where
    I: IntoIterator<Item = (&'a StudentProfile, Option<&'a str>)>,
{
    let mut total = 0u64;
    let mut placed = 0u64;
    let mut offer_stats = OfferDistribution::default();
    let mut branch_wise_stats = BTreeMap::new();

    for (profile, branch) in students {
        total += 1;
        match profile.offers.len() {
            0 => offer_stats.with_no_offers += 1,
            1 => offer_stats.with_one_offer += 1,
            _ => offer_stats.with_multiple_offers += 1,
        }
        if profile.placement_status == PlacementStatus::Placed {
            placed += 1;
            if let Some(branch) = branch.filter(|b| !b.is_empty()) {
                *branch_wise_stats.entry(branch.to_string()).or_insert(0) += 1;
            }
        }
    }

    PlacementStats {
        total_students: total,
        placed_students: placed,
        unplaced_students: total - placed,
        placement_percentage: percentage(placed, total),
        offer_stats,
        branch_wise_stats,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CompanyOverview {
    pub name: String,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct JobPostingStats {
    pub active: u64,
    pub closed: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct OfferStats {
    pub pending: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub total: u64,
    pub acceptance_rate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CompanyDashboard {
    pub company: CompanyOverview,
    pub job_postings: JobPostingStats,
    pub offers: OfferStats,
}

/// Dashboard figures for one company.
pub fn company_dashboard(profile: &CompanyProfile, jobs: &[Job], offers: &[Offer]) -> CompanyDashboard {
    let active = jobs.iter().filter(|j| j.status == JobStatus::Open).count() as u64;
    let closed = jobs.len() as u64 - active;

    let count = |status: OfferStatus| offers.iter().filter(|o| o.status == status).count() as u64;
    let pending = count(OfferStatus::Pending);
    let accepted = count(OfferStatus::Accepted);
    let rejected = count(OfferStatus::Rejected);
    let total = pending + accepted + rejected;

    CompanyDashboard {
        company: CompanyOverview {
            name: profile.company_name.clone(),
            website: profile.website.clone(),
            industry: profile.industry.clone(),
            location: profile.location.clone(),
        },
        job_postings: JobPostingStats {
            active,
            closed,
            total: active + closed,
        },
        offers: OfferStats {
            pending,
            accepted,
            rejected,
            total,
            acceptance_rate: percentage_label(accepted, total),
        },
    }
}
