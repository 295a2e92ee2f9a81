//! Job posting entity owned by a company profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::search::StudentEligibility;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum JobType {
    #[default]
    #[serde(rename = "Full-time")]
    FullTime,
    Internship,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
}

/// Job status. Company-initiated and unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum JobStatus {
    #[default]
    Open,
    Closed,
    Filled,
    Cancelled,
}

impl JobStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, JobStatus::Open)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EligibilityCriteria {
    #[serde(default)]
    pub branches: Vec<String>,
    #[serde(rename = "minCGPA")]
    pub min_cgpa: Option<f64>,
    pub graduation_year: Option<i32>,
    pub other_requirements: Option<String>,
}

impl EligibilityCriteria {
    /// A constraint missing on either side never excludes the student.
    pub fn admits(&self, student: &StudentEligibility) -> bool {
        if let Some(branch) = student.branch.as_deref() {
            if !self.accepts_branch(branch) {
                return false;
            }
        }
        if let (Some(min), Some(cgpa)) = (self.min_cgpa, student.cgpa) {
            if cgpa < min {
                return false;
            }
        }
        if let (Some(required), Some(year)) = (self.graduation_year, student.graduation_year) {
            if required != year {
                return false;
            }
        }
        true
    }

    /// An empty branch list accepts every branch.
    pub fn accepts_branch(&self, branch: &str) -> bool {
        self.branches.is_empty()
            || self
                .branches
                .iter()
                .any(|b| b.trim().eq_ignore_ascii_case(branch.trim()))
    }
}

/// Compensation package. `total_ctc` is always the sum of the three parts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub base_salary: Option<f64>,
    pub bonuses: Option<f64>,
    pub stock_options: Option<f64>,
    pub benefits: Option<String>,
    #[serde(rename = "totalCTC")]
    pub total_ctc: f64,
}

/// Package as supplied by a company; the total is derived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PackageTerms {
    pub base_salary: Option<f64>,
    pub bonuses: Option<f64>,
    pub stock_options: Option<f64>,
    pub benefits: Option<String>,
}

impl From<PackageTerms> for Package {
    fn from(terms: PackageTerms) -> Self {
        let total_ctc = [terms.base_salary, terms.bonuses, terms.stock_options]
            .iter()
            .flatten()
            .sum();
        Self {
            base_salary: terms.base_salary,
            bonuses: terms.bonuses,
            stock_options: terms.stock_options,
            benefits: terms.benefits,
            total_ctc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Round {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SelectionProcess {
    #[serde(default)]
    pub rounds: Vec<Round>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub name: String,
    pub url: String,
    pub upload_date: Option<DateTime<Utc>>,
}

/// Job posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub company: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub job_type: JobType,
    pub positions: u32,
    pub eligibility_criteria: EligibilityCriteria,
    pub package: Package,
    pub application_deadline: DateTime<Utc>,
    pub selection_process: SelectionProcess,
    pub status: JobStatus,
    pub created_by: Uuid,
    pub is_featured: bool,
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Build a new open posting.
    pub fn create(
        id: Uuid,
        company: Uuid,
        created_by: Uuid,
        input: NewJob,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        require_text("Title", &input.title)?;
        require_text("Description", &input.description)?;
        require_text("Location", &input.location)?;
        let positions = input.positions.unwrap_or(1);
        require_positions(positions)?;

        Ok(Self {
            id,
            company,
            title: input.title,
            description: input.description,
            location: input.location,
            job_type: input.job_type.unwrap_or_default(),
            positions,
            eligibility_criteria: input.eligibility_criteria.unwrap_or_default(),
            package: input.package.into(),
            application_deadline: input.application_deadline,
            selection_process: input.selection_process.unwrap_or_default(),
            status: JobStatus::Open,
            created_by,
            is_featured: input.is_featured.unwrap_or(false),
            attachments: input.attachments.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_owned_by(&self, company_id: Uuid) -> bool {
        self.company == company_id
    }

    /// Fails with `NotAuthorized(action)` unless `company_id` owns the job.
    pub fn ensure_owned_by(&self, company_id: Uuid, action: &str) -> DomainResult<()> {
        if self.is_owned_by(company_id) {
            Ok(())
        } else {
            Err(DomainError::not_authorized(action))
        }
    }

    /// Open and before its deadline
    pub fn accepts_applications(&self, now: DateTime<Utc>) -> bool {
        self.status.is_open() && self.application_deadline > now
    }

    /// Replace each supplied field. The owning company never changes.
    pub fn apply_update(&mut self, update: JobUpdate, now: DateTime<Utc>) -> DomainResult<()> {
        if let Some(positions) = update.positions {
            require_positions(positions)?;
        }
        if let Some(title) = update.title.filter(|t| !t.trim().is_empty()) {
            self.title = title;
        }
        if let Some(description) = update.description.filter(|d| !d.trim().is_empty()) {
            self.description = description;
        }
        if let Some(location) = update.location.filter(|l| !l.trim().is_empty()) {
            self.location = location;
        }
        if let Some(job_type) = update.job_type {
            self.job_type = job_type;
        }
        if let Some(positions) = update.positions {
            self.positions = positions;
        }
        if let Some(criteria) = update.eligibility_criteria {
            self.eligibility_criteria = criteria;
        }
        if let Some(package) = update.package {
            self.package = package.into();
        }
        if let Some(deadline) = update.application_deadline {
            self.application_deadline = deadline;
        }
        if let Some(process) = update.selection_process {
            self.selection_process = process;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(is_featured) = update.is_featured {
            self.is_featured = is_featured;
        }
        if let Some(attachments) = update.attachments {
            self.attachments = attachments;
        }
        self.updated_at = now;
        Ok(())
    }
}

fn require_text(label: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{} is required", label)));
    }
    Ok(())
}

fn require_positions(positions: u32) -> DomainResult<()> {
    if positions < 1 {
        return Err(DomainError::validation("Positions must be at least 1"));
    }
    Ok(())
}

/// Input for creating a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub location: String,
    pub job_type: Option<JobType>,
    pub positions: Option<u32>,
    pub eligibility_criteria: Option<EligibilityCriteria>,
    #[serde(default)]
    pub package: PackageTerms,
    pub application_deadline: DateTime<Utc>,
    pub selection_process: Option<SelectionProcess>,
    pub is_featured: Option<bool>,
    pub attachments: Option<Vec<Attachment>>,
}

/// Partial update of a job
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct JobUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub positions: Option<u32>,
    pub eligibility_criteria: Option<EligibilityCriteria>,
    pub package: Option<PackageTerms>,
    pub application_deadline: Option<DateTime<Utc>>,
    pub selection_process: Option<SelectionProcess>,
    pub status: Option<JobStatus>,
    pub is_featured: Option<bool>,
    pub attachments: Option<Vec<Attachment>>,
}

/// Job projection joined into offers and exam listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub job_type: JobType,
    pub package: Package,
    pub application_deadline: DateTime<Utc>,
}

impl From<&Job> for JobSummary {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id,
            title: job.title.clone(),
            description: job.description.clone(),
            location: job.location.clone(),
            job_type: job.job_type,
            package: job.package.clone(),
            application_deadline: job.application_deadline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_job(now: DateTime<Utc>) -> NewJob {
        NewJob {
            title: "Backend Engineer".to_string(),
            description: "Build services".to_string(),
            location: "Pune".to_string(),
            job_type: None,
            positions: None,
            eligibility_criteria: None,
            package: PackageTerms {
                base_salary: Some(900_000.0),
                bonuses: Some(100_000.0),
                stock_options: None,
                benefits: Some("Insurance".to_string()),
            },
            application_deadline: now + Duration::days(14),
            selection_process: None,
            is_featured: None,
            attachments: None,
        }
    }

    #[test]
    fn test_create_defaults() {
        let now = Utc::now();
        let job = Job::create(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), new_job(now), now).unwrap();

        assert_eq!(job.status, JobStatus::Open);
        assert_eq!(job.positions, 1);
        assert_eq!(job.job_type, JobType::FullTime);
        assert_eq!(job.package.total_ctc, 1_000_000.0);
        assert!(job.accepts_applications(now));
    }

    #[test]
    fn test_zero_positions_rejected() {
        let now = Utc::now();
        let mut input = new_job(now);
        input.positions = Some(0);
        assert!(Job::create(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), input, now).is_err());
    }

    #[test]
    fn test_package_edit_recomputes_total() {
        let now = Utc::now();
        let mut job = Job::create(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), new_job(now), now).unwrap();
        job.apply_update(
            JobUpdate {
                package: Some(PackageTerms {
                    base_salary: Some(1_500_000.0),
                    bonuses: None,
                    stock_options: Some(500_000.0),
                    benefits: None,
                }),
                status: Some(JobStatus::Closed),
                ..Default::default()
            },
            now,
        )
        .unwrap();

        assert_eq!(job.package.total_ctc, 2_000_000.0);
        assert_eq!(job.status, JobStatus::Closed);
        assert!(!job.accepts_applications(now));
    }

    #[test]
    fn test_status_overwrite_unconstrained() {
        let now = Utc::now();
        let mut job = Job::create(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), new_job(now), now).unwrap();
        for status in [JobStatus::Filled, JobStatus::Open, JobStatus::Cancelled] {
            job.apply_update(
                JobUpdate {
                    status: Some(status),
                    ..Default::default()
                },
                now,
            )
            .unwrap();
            assert_eq!(job.status, status);
        }
    }

    #[test]
    fn test_ownership() {
        let now = Utc::now();
        let owner = Uuid::new_v4();
        let job = Job::create(Uuid::new_v4(), owner, Uuid::new_v4(), new_job(now), now).unwrap();
        assert!(job.ensure_owned_by(owner, "update this job").is_ok());
        assert_eq!(
            job.ensure_owned_by(Uuid::new_v4(), "update this job")
                .unwrap_err()
                .to_string(),
            "Not authorized to update this job"
        );
    }

    #[test]
    fn test_eligibility_min_cgpa() {
        let criteria = EligibilityCriteria {
            min_cgpa: Some(7.5),
            ..Default::default()
        };
        let student = |cgpa| StudentEligibility {
            branch: None,
            cgpa,
            graduation_year: None,
        };

        assert!(!criteria.admits(&student(Some(7.4))));
        assert!(criteria.admits(&student(Some(7.5))));
        assert!(criteria.admits(&student(None)));
    }

    #[test]
    fn test_eligibility_branch_and_year() {
        let criteria = EligibilityCriteria {
            branches: vec!["CSE".to_string(), "IT".to_string()],
            graduation_year: Some(2025),
            ..Default::default()
        };
        let eligible = StudentEligibility {
            branch: Some("cse".to_string()),
            cgpa: None,
            graduation_year: Some(2025),
        };
        let wrong_branch = StudentEligibility {
            branch: Some("ECE".to_string()),
            ..eligible.clone()
        };
        let wrong_year = StudentEligibility {
            graduation_year: Some(2026),
            ..eligible.clone()
        };

        assert!(criteria.admits(&eligible));
        assert!(!criteria.admits(&wrong_branch));
        assert!(!criteria.admits(&wrong_year));
        assert!(EligibilityCriteria::default().admits(&wrong_branch));
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(JobType::FullTime).unwrap();
        assert_eq!(json, "Full-time");
        let criteria = serde_json::to_value(EligibilityCriteria {
            min_cgpa: Some(6.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(criteria["minCGPA"], 6.0);
    }
}
