use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::profile::merge;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub employer_id: i32,
    pub title: String,
    pub description: String,
    pub location: String,
    pub is_remote: bool,
    pub is_hybrid: bool,
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
    pub duration: Option<String>,
    pub salary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub employer_id: i32,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(default)]
    pub is_remote: bool,
    #[serde(default)]
    pub is_hybrid: bool,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub duration: Option<String>,
    pub salary: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl NewJob {
    /// New postings always start active.
    pub fn into_job(self, id: i32, created_at: DateTime<Utc>) -> Job {
        Job {
            id,
            employer_id: self.employer_id,
            title: self.title,
            description: self.description,
            location: self.location,
            is_remote: self.is_remote,
            is_hybrid: self.is_hybrid,
            requirements: self.requirements,
            skills: self.skills,
            duration: self.duration,
            salary: self.salary,
            created_at,
            expires_at: self.expires_at,
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub is_remote: Option<bool>,
    pub is_hybrid: Option<bool>,
    pub requirements: Option<Vec<String>>,
    pub skills: Option<Vec<String>>,
    pub duration: Option<String>,
    pub salary: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

impl JobPatch {
    pub fn apply(self, job: &mut Job) {
        if let Some(title) = self.title {
            job.title = title;
        }
        if let Some(description) = self.description {
            job.description = description;
        }
        if let Some(location) = self.location {
            job.location = location;
        }
        if let Some(is_remote) = self.is_remote {
            job.is_remote = is_remote;
        }
        if let Some(is_hybrid) = self.is_hybrid {
            job.is_hybrid = is_hybrid;
        }
        if let Some(requirements) = self.requirements {
            job.requirements = requirements;
        }
        if let Some(skills) = self.skills {
            job.skills = skills;
        }
        merge(&mut job.duration, self.duration);
        merge(&mut job.salary, self.salary);
        merge(&mut job.expires_at, self.expires_at);
        if let Some(is_active) = self.is_active {
            job.is_active = is_active;
        }
    }
}

/// Query-string filters for `GET /api/jobs/search`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSearch {
    pub query: Option<String>,
    pub location: Option<String>,
    pub is_remote: Option<bool>,
    /// Comma-separated skill names; a job matches if it lists any of them.
    pub skills: Option<String>,
}

impl JobSearch {
    pub fn skill_list(&self) -> Vec<String> {
        self.skills
            .as_deref()
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn matches(&self, job: &Job) -> bool {
        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            let query = query.to_lowercase();
            let hit = job.title.to_lowercase().contains(&query)
                || job.description.to_lowercase().contains(&query)
                || job.location.to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }
        if let Some(location) = self.location.as_deref().filter(|l| !l.is_empty()) {
            if !job.location.to_lowercase().contains(&location.to_lowercase()) {
                return false;
            }
        }
        if let Some(is_remote) = self.is_remote {
            if job.is_remote != is_remote {
                return false;
            }
        }
        let skills = self.skill_list();
        if !skills.is_empty() && !skills.iter().any(|s| job.skills.contains(s)) {
            return false;
        }
        true
    }
}
