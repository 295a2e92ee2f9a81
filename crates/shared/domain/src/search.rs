//! Job search for students, job filtering for companies, and student search.
//!
//! Everything here works on already-loaded records; the service layer decides
//! which rows to load.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::company::CompanySummary;
use crate::job::{Job, JobStatus, JobType};
use crate::pagination::{PageRequest, Pagination};
use crate::student::StudentProfile;
use crate::user::RoleDetails;
use crate::application::ApplicationStats;

/// The student-side facts eligibility is checked against
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentEligibility {
    pub branch: Option<String>,
    pub cgpa: Option<f64>,
    pub graduation_year: Option<i32>,
}

impl StudentEligibility {
    /// Branch and graduation year come from the user record, falling back to
    /// the latest academic record. CGPA is the highest recorded.
    pub fn from_profile(details: Option<&RoleDetails>, profile: &StudentProfile) -> Self {
        let branch = details
            .and_then(RoleDetails::branch)
            .map(str::to_string)
            .or_else(|| {
                profile
                    .academic_details
                    .iter()
                    .rev()
                    .find_map(|record| record.branch.clone())
            });
        let graduation_year = details.and_then(RoleDetails::graduation_year).or_else(|| {
            profile
                .academic_details
                .iter()
                .filter_map(|record| record.passing_year)
                .max()
        });

        Self {
            branch,
            cgpa: profile.highest_cgpa(),
            graduation_year,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum JobSort {
    #[default]
    Recent,
    Deadline,
    Package,
}

/// Query filters for the student job board
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase")]
pub struct JobSearchQuery {
    /// Only jobs open to this branch
    pub branch: Option<String>,
    /// Only jobs whose CGPA cutoff is at most this value
    #[serde(rename = "minCGPA")]
    pub min_cgpa: Option<f64>,
    pub graduation_year: Option<i32>,
    pub job_type: Option<JobType>,
    /// Case-insensitive substring of the location
    pub location: Option<String>,
    /// Case-insensitive substring of the company name
    pub company: Option<String>,
    /// Minimum total CTC
    pub min_package: Option<f64>,
    pub sort: Option<JobSort>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Job joined with its company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    #[serde(flatten)]
    pub job: Job,
    pub company_info: Option<CompanySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct JobPage {
    pub jobs: Vec<JobListing>,
    pub pagination: Pagination,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack
        .to_lowercase()
        .contains(needle.trim().to_lowercase().as_str())
}

impl JobSearchQuery {
    fn matches(&self, listing: &JobListing) -> bool {
        let job = &listing.job;
        let criteria = &job.eligibility_criteria;

        if let Some(branch) = self.branch.as_deref().filter(|b| !b.trim().is_empty()) {
            if !criteria.accepts_branch(branch) {
                return false;
            }
        }
        if let Some(cgpa) = self.min_cgpa {
            if criteria.min_cgpa.unwrap_or(0.0) > cgpa {
                return false;
            }
        }
        if let Some(year) = self.graduation_year {
            if criteria.graduation_year.is_some_and(|y| y != year) {
                return false;
            }
        }
        if let Some(job_type) = self.job_type {
            if job.job_type != job_type {
                return false;
            }
        }
        if let Some(location) = self.location.as_deref() {
            if !contains_ci(&job.location, location) {
                return false;
            }
        }
        if let Some(company) = self.company.as_deref() {
            let name_matches = listing
                .company_info
                .as_ref()
                .is_some_and(|c| contains_ci(&c.company_name, company));
            if !name_matches {
                return false;
            }
        }
        if let Some(floor) = self.min_package {
            if job.package.total_ctc < floor {
                return false;
            }
        }
        true
    }
}

/// Open, unexpired, eligible jobs the student has not applied to.
pub fn search_available_jobs(
    candidates: Vec<JobListing>,
    student: &StudentProfile,
    eligibility: &StudentEligibility,
    query: &JobSearchQuery,
    now: DateTime<Utc>,
) -> JobPage {
    let mut jobs: Vec<JobListing> = candidates
        .into_iter()
        .filter(|listing| listing.job.accepts_applications(now))
        .filter(|listing| !student.has_applied(listing.job.id))
        .filter(|listing| listing.job.eligibility_criteria.admits(eligibility))
        .filter(|listing| query.matches(listing))
        .collect();

    match query.sort.unwrap_or_default() {
        JobSort::Recent => jobs.sort_by(|a, b| b.job.created_at.cmp(&a.job.created_at)),
        JobSort::Deadline => {
            jobs.sort_by(|a, b| a.job.application_deadline.cmp(&b.job.application_deadline))
        }
        JobSort::Package => jobs.sort_by(|a, b| {
            b.job
                .package
                .total_ctc
                .total_cmp(&a.job.package.total_ctc)
        }),
    }

    let (jobs, pagination) = PageRequest::new(query.page, query.limit).paginate(jobs);
    JobPage { jobs, pagination }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub enum CompanyJobSort {
    #[default]
    CreatedAt,
    ApplicationDeadline,
    Title,
    Positions,
    #[serde(rename = "totalCTC", alias = "package.totalCTC")]
    TotalCtc,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Query filters for a company's own postings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase")]
pub struct CompanyJobFilter {
    pub status: Option<JobStatus>,
    pub job_type: Option<JobType>,
    pub location: Option<String>,
    #[serde(rename = "minCTC")]
    pub min_ctc: Option<f64>,
    #[serde(rename = "maxCTC")]
    pub max_ctc: Option<f64>,
    /// Earliest application deadline (inclusive)
    pub from_date: Option<NaiveDate>,
    /// Latest application deadline (inclusive)
    pub to_date: Option<NaiveDate>,
    pub sort: Option<CompanyJobSort>,
    pub order: Option<SortOrder>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl CompanyJobFilter {
    fn matches(&self, job: &Job) -> bool {
        let deadline = job.application_deadline.date_naive();
        self.status.map_or(true, |s| job.status == s)
            && self.job_type.map_or(true, |t| job.job_type == t)
            && self
                .location
                .as_deref()
                .map_or(true, |l| contains_ci(&job.location, l))
            && self.min_ctc.map_or(true, |min| job.package.total_ctc >= min)
            && self.max_ctc.map_or(true, |max| job.package.total_ctc <= max)
            && self.from_date.map_or(true, |from| deadline >= from)
            && self.to_date.map_or(true, |to| deadline <= to)
    }

    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        let ordering = match self.sort.unwrap_or_default() {
            CompanyJobSort::CreatedAt => a.created_at.cmp(&b.created_at),
            CompanyJobSort::ApplicationDeadline => a.application_deadline.cmp(&b.application_deadline),
            CompanyJobSort::Title => a.title.cmp(&b.title),
            CompanyJobSort::Positions => a.positions.cmp(&b.positions),
            CompanyJobSort::TotalCtc => a.package.total_ctc.total_cmp(&b.package.total_ctc),
            CompanyJobSort::Status => status_rank(a.status).cmp(&status_rank(b.status)),
        };
        match self.order.unwrap_or_default() {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

fn status_rank(status: JobStatus) -> u8 {
    match status {
        JobStatus::Cancelled => 0,
        JobStatus::Closed => 1,
        JobStatus::Filled => 2,
        JobStatus::Open => 3,
    }
}

/// Filter, sort and page a company's jobs.
pub fn filter_company_jobs(jobs: Vec<Job>, filter: &CompanyJobFilter) -> (Vec<Job>, Pagination) {
    let mut jobs: Vec<Job> = jobs.into_iter().filter(|job| filter.matches(job)).collect();
    jobs.sort_by(|a, b| filter.compare(a, b));
    PageRequest::new(filter.page, filter.limit).paginate(jobs)
}

/// Company job with its application counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct JobWithStats {
    #[serde(flatten)]
    pub job: Job,
    pub application_stats: ApplicationStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CompanyJobPage {
    pub jobs: Vec<JobWithStats>,
    pub pagination: Pagination,
}

/// Query filters companies use to find students
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase")]
pub struct StudentSearchQuery {
    /// Comma-separated skills; any one must match
    pub skills: Option<String>,
    pub branch: Option<String>,
    pub cgpa_min: Option<f64>,
    pub graduation_year: Option<i32>,
}

impl StudentSearchQuery {
    fn skill_list(&self) -> Vec<String> {
        self.skills
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Identity filters need the user record; without one the profile is
    /// excluded whenever such a filter is set.
    pub fn matches(&self, details: Option<&RoleDetails>, profile: &StudentProfile) -> bool {
        let wanted = self.skill_list();
        if !wanted.is_empty()
            && !profile
                .skills
                .iter()
                .any(|skill| wanted.contains(&skill.trim().to_lowercase()))
        {
            return false;
        }

        let needs_identity = self.branch.is_some() || self.graduation_year.is_some();
        if needs_identity && details.is_none() {
            return false;
        }
        if let Some(branch) = self.branch.as_deref() {
            if details.and_then(RoleDetails::branch) != Some(branch) {
                return false;
            }
        }
        if let Some(year) = self.graduation_year {
            if details.and_then(RoleDetails::graduation_year) != Some(year) {
                return false;
            }
        }
        if let (Some(min), Some(best)) = (self.cgpa_min, profile.highest_cgpa()) {
            if best < min {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{EligibilityCriteria, NewJob, PackageTerms};
    use crate::student::AcademicRecord;
    use chrono::Duration;
    use uuid::Uuid;

    fn listing(
        title: &str,
        criteria: EligibilityCriteria,
        ctc: f64,
        created_at: DateTime<Utc>,
        deadline: DateTime<Utc>,
    ) -> JobListing {
        let mut job = Job::create(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            NewJob {
                title: title.to_string(),
                description: "desc".to_string(),
                location: "Bengaluru".to_string(),
                job_type: None,
                positions: Some(2),
                eligibility_criteria: Some(criteria),
                package: PackageTerms {
                    base_salary: Some(ctc),
                    ..Default::default()
                },
                application_deadline: deadline,
                selection_process: None,
                is_featured: None,
                attachments: None,
            },
            created_at,
        )
        .unwrap();
        job.created_at = created_at;
        JobListing {
            company_info: Some(CompanySummary {
                id: job.company,
                company_name: format!("{} Corp", title),
                website: None,
                industry: None,
            }),
            job,
        }
    }

    fn student_with_cgpa(cgpa: f64) -> StudentProfile {
        let mut profile = StudentProfile::new(Uuid::new_v4(), Uuid::new_v4(), Utc::now());
        profile.academic_details = vec![AcademicRecord {
            cgpa: Some(cgpa),
            branch: Some("CSE".to_string()),
            ..Default::default()
        }];
        profile
    }

    #[test]
    fn test_min_cgpa_eligibility() {
        let now = Utc::now();
        let job = listing(
            "Analyst",
            EligibilityCriteria {
                min_cgpa: Some(7.5),
                ..Default::default()
            },
            600_000.0,
            now,
            now + Duration::days(5),
        );

        let weak = student_with_cgpa(7.4);
        let strong = student_with_cgpa(7.5);
        let query = JobSearchQuery::default();

        let page = search_available_jobs(
            vec![job.clone()],
            &weak,
            &StudentEligibility::from_profile(None, &weak),
            &query,
            now,
        );
        assert!(page.jobs.is_empty());

        let page = search_available_jobs(
            vec![job],
            &strong,
            &StudentEligibility::from_profile(None, &strong),
            &query,
            now,
        );
        assert_eq!(page.jobs.len(), 1);
    }

    #[test]
    fn test_excludes_closed_expired_and_applied() {
        let now = Utc::now();
        let open = listing("Open", Default::default(), 1.0, now, now + Duration::days(1));
        let expired = listing("Expired", Default::default(), 1.0, now, now - Duration::days(1));
        let mut closed = listing("Closed", Default::default(), 1.0, now, now + Duration::days(1));
        closed.job.status = JobStatus::Closed;
        let applied = listing("Applied", Default::default(), 1.0, now, now + Duration::days(1));

        let mut student = student_with_cgpa(9.0);
        student.apply(Uuid::new_v4(), applied.job.id, now).unwrap();

        let page = search_available_jobs(
            vec![open.clone(), expired, closed, applied],
            &student,
            &StudentEligibility::from_profile(None, &student),
            &JobSearchQuery::default(),
            now,
        );
        assert_eq!(page.jobs.len(), 1);
        assert_eq!(page.jobs[0].job.id, open.job.id);
    }

    #[test]
    fn test_sorting_and_pagination() {
        let now = Utc::now();
        let a = listing("A", Default::default(), 500_000.0, now - Duration::days(3), now + Duration::days(9));
        let b = listing("B", Default::default(), 2_000_000.0, now - Duration::days(2), now + Duration::days(2));
        let c = listing("C", Default::default(), 1_000_000.0, now - Duration::days(1), now + Duration::days(5));
        let student = student_with_cgpa(8.0);
        let eligibility = StudentEligibility::from_profile(None, &student);
        let all = vec![a, b, c];

        let titles = |sort, page, limit| {
            let query = JobSearchQuery {
                sort: Some(sort),
                page,
                limit,
                ..Default::default()
            };
            search_available_jobs(all.clone(), &student, &eligibility, &query, now)
                .jobs
                .into_iter()
                .map(|l| l.job.title)
                .collect::<Vec<_>>()
        };

        assert_eq!(titles(JobSort::Recent, None, None), vec!["C", "B", "A"]);
        assert_eq!(titles(JobSort::Deadline, None, None), vec!["B", "C", "A"]);
        assert_eq!(titles(JobSort::Package, None, None), vec!["B", "C", "A"]);
        assert_eq!(titles(JobSort::Recent, Some(2), Some(2)), vec!["A"]);

        let query = JobSearchQuery {
            limit: Some(2),
            ..Default::default()
        };
        let page = search_available_jobs(all, &student, &eligibility, &query, now);
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[test]
    fn test_query_filters() {
        let now = Utc::now();
        let cse_only = listing(
            "Kernel",
            EligibilityCriteria {
                branches: vec!["CSE".to_string()],
                min_cgpa: Some(8.0),
                ..Default::default()
            },
            1_200_000.0,
            now,
            now + Duration::days(3),
        );
        let open_all = listing("Support", Default::default(), 400_000.0, now, now + Duration::days(3));
        let student = student_with_cgpa(9.0);
        let eligibility = StudentEligibility::from_profile(None, &student);

        let run = |query: JobSearchQuery| {
            search_available_jobs(
                vec![cse_only.clone(), open_all.clone()],
                &student,
                &eligibility,
                &query,
                now,
            )
            .jobs
            .len()
        };

        assert_eq!(run(JobSearchQuery { branch: Some("ECE".into()), ..Default::default() }), 1);
        assert_eq!(run(JobSearchQuery { min_cgpa: Some(7.0), ..Default::default() }), 1);
        assert_eq!(run(JobSearchQuery { min_package: Some(1_000_000.0), ..Default::default() }), 1);
        assert_eq!(run(JobSearchQuery { company: Some("kernel".into()), ..Default::default() }), 1);
        assert_eq!(run(JobSearchQuery { location: Some("bengal".into()), ..Default::default() }), 2);
    }

    #[test]
    fn test_eligibility_prefers_user_details() {
        let student = student_with_cgpa(8.0);
        let details = RoleDetails::Student {
            enrollment_number: "E1".to_string(),
            branch: "IT".to_string(),
            graduation_year: Some(2026),
        };
        let eligibility = StudentEligibility::from_profile(Some(&details), &student);
        assert_eq!(eligibility.branch.as_deref(), Some("IT"));
        assert_eq!(eligibility.graduation_year, Some(2026));
        assert_eq!(eligibility.cgpa, Some(8.0));

        let fallback = StudentEligibility::from_profile(None, &student);
        assert_eq!(fallback.branch.as_deref(), Some("CSE"));
    }

    #[test]
    fn test_company_filter_sort() {
        let now = Utc::now();
        let jobs: Vec<Job> = vec![
            listing("b", Default::default(), 300.0, now, now + Duration::days(1)).job,
            listing("a", Default::default(), 100.0, now, now + Duration::days(2)).job,
            listing("c", Default::default(), 200.0, now, now + Duration::days(3)).job,
        ];

        let filter = CompanyJobFilter {
            sort: Some(CompanyJobSort::Title),
            order: Some(SortOrder::Asc),
            ..Default::default()
        };
        let (page, meta) = filter_company_jobs(jobs.clone(), &filter);
        let titles: Vec<_> = page.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        assert_eq!(meta.total, 3);

        let filter = CompanyJobFilter {
            min_ctc: Some(150.0),
            max_ctc: Some(250.0),
            ..Default::default()
        };
        let (page, _) = filter_company_jobs(jobs, &filter);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title, "c");
    }

    #[test]
    fn test_student_search() {
        let mut profile = student_with_cgpa(7.0);
        profile.skills = vec!["Rust".to_string(), "Go".to_string()];
        let details = RoleDetails::Student {
            enrollment_number: "E1".to_string(),
            branch: "CSE".to_string(),
            graduation_year: Some(2025),
        };

        let by_skill = StudentSearchQuery {
            skills: Some("python, rust".to_string()),
            ..Default::default()
        };
        assert!(by_skill.matches(Some(&details), &profile));

        let too_high = StudentSearchQuery {
            cgpa_min: Some(8.0),
            ..Default::default()
        };
        assert!(!too_high.matches(Some(&details), &profile));

        let by_branch = StudentSearchQuery {
            branch: Some("CSE".to_string()),
            ..Default::default()
        };
        assert!(by_branch.matches(Some(&details), &profile));
        assert!(!by_branch.matches(None, &profile));
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let now = Utc::now();
        let job = listing(
            "Analyst",
            EligibilityCriteria::default(),
            600_000.0,
            now,
            now + Duration::days(5),
        );
        let student = student_with_cgpa(8.0);
        let query: JobSearchQuery =
            serde_json::from_str(r#"{"page":18446744073709551615}"#).unwrap();

        let page = search_available_jobs(
            vec![job],
            &student,
            &StudentEligibility::from_profile(None, &student),
            &query,
            now,
        );
        assert!(page.jobs.is_empty());
        assert_eq!(page.pagination.total, 1);
    }
}
