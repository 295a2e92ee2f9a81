//! Job applications embedded in a student profile, and the upcoming-exam
//! projection derived from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DEFAULT_EXAM_ROUND;

/// Application status. Any status may overwrite any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Shortlisted,
    Rejected,
    #[serde(rename = "In Progress")]
    InProgress,
    Selected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ExamType {
    #[default]
    Online,
    Offline,
    Interview,
}

fn default_round() -> String {
    DEFAULT_EXAM_ROUND.to_string()
}

/// Exam schedule attached to an application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ExamSchedule {
    #[serde(default)]
    pub is_scheduled: bool,
    pub exam_date: Option<DateTime<Utc>>,
    pub exam_time: Option<String>,
    pub exam_venue: Option<String>,
    #[serde(default)]
    pub exam_type: ExamType,
    #[serde(default = "default_round")]
    pub round: String,
}

impl Default for ExamSchedule {
    fn default() -> Self {
        Self {
            is_scheduled: false,
            exam_date: None,
            exam_time: None,
            exam_venue: None,
            exam_type: ExamType::default(),
            round: default_round(),
        }
    }
}

/// Exam details supplied when scheduling. Replaces the schedule wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ExamDetails {
    pub exam_date: Option<DateTime<Utc>>,
    pub exam_time: Option<String>,
    pub exam_venue: Option<String>,
    pub exam_type: Option<ExamType>,
    pub round: Option<String>,
}

impl From<ExamDetails> for ExamSchedule {
    fn from(details: ExamDetails) -> Self {
        Self {
            is_scheduled: true,
            exam_date: details.exam_date,
            exam_time: details.exam_time,
            exam_venue: details.exam_venue,
            exam_type: details.exam_type.unwrap_or_default(),
            round: details.round.unwrap_or_else(default_round),
        }
    }
}

/// A student's application to one job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub job: Uuid,
    pub applied_date: DateTime<Utc>,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub exam_scheduled: ExamSchedule,
}

impl Application {
    pub fn new(id: Uuid, job: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            job,
            applied_date: now,
            status: ApplicationStatus::Applied,
            exam_scheduled: ExamSchedule::default(),
        }
    }

    /// Overwrite status and/or exam schedule.
    pub fn apply_update(&mut self, update: ApplicationUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(details) = update.exam_details {
            self.exam_scheduled = details.into();
        }
    }
}

/// Input for updating an application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ApplicationUpdate {
    pub status: Option<ApplicationStatus>,
    pub exam_details: Option<ExamDetails>,
}

/// Projection of a scheduled future exam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpcomingExam {
    pub job: Uuid,
    pub exam_date: DateTime<Utc>,
    pub exam_time: Option<String>,
    pub exam_venue: Option<String>,
    pub exam_type: ExamType,
    pub round: String,
}

/// Upcoming exam with the job title and company name resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ExamListing {
    #[serde(flatten)]
    pub exam: UpcomingExam,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
}

/// Recompute the upcoming exams from the applications.
///
/// Keeps scheduled exams dated strictly after `now`, soonest first.
pub fn derive_upcoming_exams(applied: &[Application], now: DateTime<Utc>) -> Vec<UpcomingExam> {
    let mut exams: Vec<UpcomingExam> = applied
        .iter()
        .filter(|app| app.exam_scheduled.is_scheduled)
        .filter_map(|app| {
            let schedule = &app.exam_scheduled;
            let exam_date = schedule.exam_date.filter(|date| *date > now)?;
            Some(UpcomingExam {
                job: app.job,
                exam_date,
                exam_time: schedule.exam_time.clone(),
                exam_venue: schedule.exam_venue.clone(),
                exam_type: schedule.exam_type,
                round: schedule.round.clone(),
            })
        })
        .collect();

    exams.sort_by_key(|exam| exam.exam_date);
    exams
}

/// Per-status application counts for one job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStats {
    pub total: u64,
    pub applied: u64,
    pub shortlisted: u64,
    pub rejected: u64,
    pub in_progress: u64,
    pub selected: u64,
}

impl ApplicationStats {
    pub fn record(&mut self, status: ApplicationStatus) {
        self.total += 1;
        match status {
            ApplicationStatus::Applied => self.applied += 1,
            ApplicationStatus::Shortlisted => self.shortlisted += 1,
            ApplicationStatus::Rejected => self.rejected += 1,
            ApplicationStatus::InProgress => self.in_progress += 1,
            ApplicationStatus::Selected => self.selected += 1,
        }
    }
}

impl FromIterator<ApplicationStatus> for ApplicationStats {
    fn from_iter<I: IntoIterator<Item = ApplicationStatus>>(iter: I) -> Self {
        let mut stats = ApplicationStats::default();
        for status in iter {
            stats.record(status);
        }
        stats
    }
}
