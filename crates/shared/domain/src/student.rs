//! Student profile aggregate.
//!
//! Owns the embedded applications. Every write to `applied_jobs` goes through
//! a method here that also recomputes `upcoming_exams`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{derive_upcoming_exams, Application, ApplicationUpdate, UpcomingExam};
use crate::error::{DomainError, DomainResult};
use crate::user::{RoleDetails, User, UserContact};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum PlacementStatus {
    #[default]
    #[serde(rename = "Not Placed")]
    NotPlaced,
    Placed,
}

impl std::str::FromStr for PlacementStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Placed" => Ok(PlacementStatus::Placed),
            "Not Placed" => Ok(PlacementStatus::NotPlaced),
            _ => Err(DomainError::validation("Invalid placement status")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PersonalInfo {
    pub dob: Option<NaiveDate>,
    pub contact: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AcademicRecord {
    pub degree: Option<String>,
    pub branch: Option<String>,
    pub cgpa: Option<f64>,
    pub passing_year: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Project {
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Certification {
    pub name: String,
    pub authority: Option<String>,
    pub link: Option<String>,
}

/// Student profile, one per student user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub id: Uuid,
    pub user: Uuid,
    pub personal_info: PersonalInfo,
    pub academic_details: Vec<AcademicRecord>,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub placement_status: PlacementStatus,
    pub offers: Vec<Uuid>,
    pub applied_jobs: Vec<Application>,
    pub upcoming_exams: Vec<UpcomingExam>,
    pub upgrades_used: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StudentProfile {
    /// Empty profile created at registration
    pub fn new(id: Uuid, user: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user,
            personal_info: PersonalInfo::default(),
            academic_details: Vec::new(),
            skills: Vec::new(),
            projects: Vec::new(),
            certifications: Vec::new(),
            placement_status: PlacementStatus::NotPlaced,
            offers: Vec::new(),
            applied_jobs: Vec::new(),
            upcoming_exams: Vec::new(),
            upgrades_used: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Highest CGPA across academic records.
    pub fn highest_cgpa(&self) -> Option<f64> {
        self.academic_details
            .iter()
            .filter_map(|record| record.cgpa)
            .fold(None, |best, cgpa| match best {
                Some(b) if b >= cgpa => Some(b),
                _ => Some(cgpa),
            })
    }

    pub fn has_applied(&self, job_id: Uuid) -> bool {
        self.applied_jobs.iter().any(|app| app.job == job_id)
    }

    /// Append a new application for `job_id`.
    ///
    /// # Errors
    /// `AlreadyApplied` if an application for the job exists.
    pub fn apply(
        &mut self,
        application_id: Uuid,
        job_id: Uuid,
        now: DateTime<Utc>,
    ) -> DomainResult<&Application> {
        if self.has_applied(job_id) {
            return Err(DomainError::AlreadyApplied);
        }

        self.applied_jobs
            .push(Application::new(application_id, job_id, now));
        self.touch_applications(now);

        self.applied_jobs
            .last()
            .ok_or_else(|| DomainError::internal("application was not recorded"))
    }

    /// Overwrite status and/or exam schedule on one application.
    pub fn update_application(
        &mut self,
        application_id: Uuid,
        update: ApplicationUpdate,
        now: DateTime<Utc>,
    ) -> DomainResult<&Application> {
        let index = self
            .applied_jobs
            .iter()
            .position(|app| app.id == application_id)
            .ok_or_else(|| DomainError::not_found("Application"))?;

        self.applied_jobs[index].apply_update(update);
        self.touch_applications(now);

        Ok(&self.applied_jobs[index])
    }

    fn touch_applications(&mut self, now: DateTime<Utc>) {
        self.upcoming_exams = derive_upcoming_exams(&self.applied_jobs, now);
        self.updated_at = now;
    }

    /// Record an issued offer
    pub fn link_offer(&mut self, offer_id: Uuid, now: DateTime<Utc>) {
        if !self.offers.contains(&offer_id) {
            self.offers.push(offer_id);
        }
        self.updated_at = now;
    }

    pub fn mark_placed(&mut self, now: DateTime<Utc>) {
        self.set_placement_status(PlacementStatus::Placed, now);
    }

    /// Manual override by the placement office
    pub fn set_placement_status(&mut self, status: PlacementStatus, now: DateTime<Utc>) {
        self.placement_status = status;
        self.updated_at = now;
    }

    /// Replace each supplied section.
    pub fn apply_update(&mut self, update: StudentProfileUpdate, now: DateTime<Utc>) {
        if let Some(personal_info) = update.personal_info {
            self.personal_info = personal_info;
        }
        if let Some(academic_details) = update.academic_details {
            self.academic_details = academic_details;
        }
        if let Some(skills) = update.skills {
            self.skills = dedup_skills(skills);
        }
        if let Some(projects) = update.projects {
            self.projects = projects;
        }
        if let Some(certifications) = update.certifications {
            self.certifications = certifications;
        }
        self.updated_at = now;
    }
}

/// Trim, drop blanks and duplicates, keep first-seen order.
fn dedup_skills(skills: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(skills.len());
    for skill in skills {
        let skill = skill.trim();
        if !skill.is_empty() && !out.iter().any(|s| s == skill) {
            out.push(skill.to_string());
        }
    }
    out
}

/// Partial update of a student profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct StudentProfileUpdate {
    pub personal_info: Option<PersonalInfo>,
    pub academic_details: Option<Vec<AcademicRecord>>,
    pub skills: Option<Vec<String>>,
    pub projects: Option<Vec<Project>>,
    pub certifications: Option<Vec<Certification>>,
}

/// Student identity fields joined onto a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct StudentIdentity {
    pub name: String,
    pub email: String,
    pub enrollment_number: Option<String>,
    pub branch: Option<String>,
    pub graduation_year: Option<i32>,
}

impl From<&User> for StudentIdentity {
    fn from(user: &User) -> Self {
        let (enrollment_number, branch, graduation_year) = match &user.details {
            RoleDetails::Student {
                enrollment_number,
                branch,
                graduation_year,
            } => (
                Some(enrollment_number.clone()),
                Some(branch.clone()),
                *graduation_year,
            ),
            _ => (None, None, None),
        };
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            enrollment_number,
            branch,
            graduation_year,
        }
    }
}

/// Profile joined with its owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StudentProfileView {
    #[serde(flatten)]
    pub profile: StudentProfile,
    #[serde(rename = "userInfo")]
    pub user_info: Option<StudentIdentity>,
}

/// Profile as other parties see it: no offers, no upgrade counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PublicStudentProfile {
    pub id: Uuid,
    pub user: Uuid,
    pub user_info: Option<StudentIdentity>,
    pub personal_info: PersonalInfo,
    pub academic_details: Vec<AcademicRecord>,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub placement_status: PlacementStatus,
    pub applied_jobs: Vec<Application>,
    pub upcoming_exams: Vec<UpcomingExam>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PublicStudentProfile {
    pub fn new(profile: StudentProfile, user_info: Option<StudentIdentity>) -> Self {
        Self {
            id: profile.id,
            user: profile.user,
            user_info,
            personal_info: profile.personal_info,
            academic_details: profile.academic_details,
            skills: profile.skills,
            projects: profile.projects,
            certifications: profile.certifications,
            placement_status: profile.placement_status,
            applied_jobs: profile.applied_jobs,
            upcoming_exams: profile.upcoming_exams,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// Short student projection used in offer listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub id: Uuid,
    pub user: Option<UserContact>,
    pub personal_info: PersonalInfo,
    pub academic_details: Vec<AcademicRecord>,
}

impl StudentSummary {
    pub fn new(profile: &StudentProfile, user: Option<UserContact>) -> Self {
        Self {
            id: profile.id,
            user,
            personal_info: profile.personal_info.clone(),
            academic_details: profile.academic_details.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationStatus, ExamDetails};
    use chrono::Duration;

    fn profile() -> StudentProfile {
        StudentProfile::new(Uuid::new_v4(), Uuid::new_v4(), Utc::now())
    }

    #[test]
    fn test_placement_status_parsing() {
        assert_eq!("Not Placed".parse::<PlacementStatus>(), Ok(PlacementStatus::NotPlaced));
        assert!("placed".parse::<PlacementStatus>().is_err());
    }

    #[test]
    fn test_apply_twice_fails() {
        let mut student = profile();
        let job = Uuid::new_v4();
        let now = Utc::now();

        let app = student.apply(Uuid::new_v4(), job, now).unwrap();
        assert_eq!(app.status, ApplicationStatus::Applied);
        assert!(!app.exam_scheduled.is_scheduled);
        assert_eq!(student.applied_jobs.len(), 1);

        let err = student.apply(Uuid::new_v4(), job, now).unwrap_err();
        assert_eq!(err, DomainError::AlreadyApplied);
        assert_eq!(student.applied_jobs.len(), 1);
    }

    #[test]
    fn test_scheduling_exam_refreshes_upcoming() {
        let mut student = profile();
        let now = Utc::now();
        let app_id = Uuid::new_v4();
        student.apply(app_id, Uuid::new_v4(), now).unwrap();
        assert!(student.upcoming_exams.is_empty());

        student
            .update_application(
                app_id,
                ApplicationUpdate {
                    status: Some(ApplicationStatus::Shortlisted),
                    exam_details: Some(ExamDetails {
                        exam_date: Some(now + Duration::days(3)),
                        exam_time: None,
                        exam_venue: None,
                        exam_type: None,
                        round: Some("Technical".to_string()),
                    }),
                },
                now,
            )
            .unwrap();

        assert_eq!(student.upcoming_exams.len(), 1);
        assert_eq!(student.upcoming_exams[0].round, "Technical");
        assert_eq!(
            student.applied_jobs[0].status,
            ApplicationStatus::Shortlisted
        );
    }

    #[test]
    fn test_update_unknown_application() {
        let mut student = profile();
        let err = student
            .update_application(Uuid::new_v4(), ApplicationUpdate::default(), Utc::now())
            .unwrap_err();
        assert_eq!(err.to_string(), "Application not found");
    }

    #[test]
    fn test_highest_cgpa() {
        let mut student = profile();
        assert_eq!(student.highest_cgpa(), None);

        student.academic_details = vec![
            AcademicRecord {
                cgpa: Some(7.2),
                ..Default::default()
            },
            AcademicRecord::default(),
            AcademicRecord {
                cgpa: Some(8.4),
                ..Default::default()
            },
        ];
        assert_eq!(student.highest_cgpa(), Some(8.4));
    }

    #[test]
    fn test_skills_deduplicated() {
        let mut student = profile();
        student.apply_update(
            StudentProfileUpdate {
                skills: Some(vec![
                    "Rust".to_string(),
                    " SQL ".to_string(),
                    "Rust".to_string(),
                    "".to_string(),
                ]),
                ..Default::default()
            },
            Utc::now(),
        );
        assert_eq!(student.skills, vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_public_view_hides_offers() {
        let mut student = profile();
        student.link_offer(Uuid::new_v4(), Utc::now());
        let json = serde_json::to_value(PublicStudentProfile::new(student, None)).unwrap();
        assert!(json.get("offers").is_none());
        assert!(json.get("upgradesUsed").is_none());
        assert_eq!(json["placementStatus"], "Not Placed");
    }
}
