use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::job::Job;
use crate::models::profile::{merge, StudentProfile};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    InReview,
    InterviewScheduled,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i32,
    pub student_id: i32,
    pub job_id: i32,
    pub status: ApplicationStatus,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub student_id: i32,
    pub job_id: i32,
    #[serde(default)]
    pub status: ApplicationStatus,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPatch {
    pub status: Option<ApplicationStatus>,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
}

impl ApplicationPatch {
    pub fn apply(self, application: &mut Application, now: DateTime<Utc>) {
        if let Some(status) = self.status {
            application.status = status;
        }
        merge(&mut application.cover_letter, self.cover_letter);
        merge(&mut application.resume_url, self.resume_url);
        application.updated_at = now;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationWithJob {
    #[serde(flatten)]
    pub application: Application,
    pub job: Option<Job>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationWithStudent {
    #[serde(flatten)]
    pub application: Application,
    pub student: Option<StudentProfile>,
}
