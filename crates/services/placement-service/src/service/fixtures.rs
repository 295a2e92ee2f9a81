//! Builders shared by the service tests.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use domain::{
    CompanyProfile, Job, NewJob, PackageTerms, RoleDetails, StudentProfile, User,
};

pub fn student_user(id: Uuid, name: &str, branch: &str) -> User {
    User::new(
        id,
        name.to_string(),
        format!("{}@campus.test", name.to_lowercase()),
        String::new(),
        RoleDetails::Student {
            enrollment_number: format!("EN-{name}"),
            branch: branch.to_string(),
            graduation_year: Some(2025),
        },
        Utc::now(),
    )
}

pub fn company_user(id: Uuid) -> User {
    User::new(
        id,
        "Acme HR".to_string(),
        "hr@acme.test".to_string(),
        String::new(),
        RoleDetails::Company {
            hr_name: "Ravi".to_string(),
            contact_number: "9876543210".to_string(),
        },
        Utc::now(),
    )
}

pub fn tpo_user(id: Uuid) -> User {
    User::new(
        id,
        "Placement Officer".to_string(),
        "tpo@campus.test".to_string(),
        String::new(),
        RoleDetails::Tpo {
            institute_name: "Campus Institute".to_string(),
            contact_number: "1234567890".to_string(),
        },
        Utc::now(),
    )
}

pub fn company(user_id: Uuid) -> CompanyProfile {
    CompanyProfile::new(Uuid::new_v4(), user_id, "Acme".to_string(), Utc::now())
}

pub fn student(user_id: Uuid) -> StudentProfile {
    StudentProfile::new(Uuid::new_v4(), user_id, Utc::now())
}

pub fn job_input(title: &str, base_salary: f64, deadline: DateTime<Utc>) -> NewJob {
    NewJob {
        title: title.to_string(),
        description: format!("{title} role"),
        location: "Pune".to_string(),
        job_type: None,
        positions: None,
        eligibility_criteria: None,
        package: PackageTerms {
            base_salary: Some(base_salary),
            ..Default::default()
        },
        application_deadline: deadline,
        selection_process: None,
        is_featured: None,
        attachments: None,
    }
}

/// Open job owned by `company_id`, closing in a week.
pub fn job(company_id: Uuid, title: &str) -> Job {
    let now = Utc::now();
    Job::create(
        Uuid::new_v4(),
        company_id,
        Uuid::new_v4(),
        job_input(title, 600_000.0, now + Duration::days(7)),
        now,
    )
    .expect("valid job")
}
