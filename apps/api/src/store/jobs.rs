use chrono::Utc;
use tracing::info;

use super::MemStore;
use crate::errors::AppError;
use crate::models::job::{Job, JobPatch, JobSearch, NewJob};

impl MemStore {
    pub async fn get_job(&self, id: i32) -> Option<Job> {
        self.tables.read().await.jobs.get(id).cloned()
    }

    /// Every job, active or not, ascending by id.
    pub async fn all_jobs(&self) -> Vec<Job> {
        self.tables.read().await.jobs.values().cloned().collect()
    }

    pub async fn active_jobs(&self) -> Vec<Job> {
        self.tables
            .read()
            .await
            .jobs
            .values()
            .filter(|j| j.is_active)
            .cloned()
            .collect()
    }

    pub async fn jobs_by_employer(&self, employer_id: i32) -> Vec<Job> {
        self.tables
            .read()
            .await
            .jobs
            .values()
            .filter(|j| j.employer_id == employer_id)
            .cloned()
            .collect()
    }

    pub async fn search_jobs(&self, search: &JobSearch) -> Vec<Job> {
        self.tables
            .read()
            .await
            .jobs
            .values()
            .filter(|j| j.is_active && search.matches(j))
            .cloned()
            .collect()
    }

    pub async fn create_job(&self, new_job: NewJob) -> Result<Job, AppError> {
        let mut tables = self.tables.write().await;
        if tables.employer_profiles.get(new_job.employer_id).is_none() {
            return Err(AppError::NotFound("Employer profile not found".to_string()));
        }

        let job = tables
            .jobs
            .insert_with(|id| new_job.into_job(id, Utc::now()));
        info!("Created job {} '{}' for employer {}", job.id, job.title, job.employer_id);
        Ok(job)
    }

    pub async fn update_job(&self, id: i32, patch: JobPatch) -> Option<Job> {
        let mut tables = self.tables.write().await;
        let job = tables.jobs.get_mut(id)?;
        patch.apply(job);
        Some(job.clone())
    }

    /// Removes the job. Applications and match scores referencing it are kept.
    pub async fn delete_job(&self, id: i32) -> bool {
        let removed = self.tables.write().await.jobs.remove(id).is_some();
        if removed {
            info!("Deleted job {id}");
        }
        removed
    }
}
