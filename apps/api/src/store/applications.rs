use chrono::Utc;
use tracing::info;

use super::MemStore;
use crate::errors::AppError;
use crate::models::application::{
    Application, ApplicationPatch, ApplicationWithJob, ApplicationWithStudent, NewApplication,
};

impl MemStore {
    /// Files an application. The student and job must exist and a student
    /// may apply to a given job only once.
    pub async fn create_application(
        &self,
        new_application: NewApplication,
    ) -> Result<Application, AppError> {
        let mut tables = self.tables.write().await;
        if tables
            .student_profiles
            .get(new_application.student_id)
            .is_none()
        {
            return Err(AppError::NotFound("Student profile not found".to_string()));
        }
        if tables.jobs.get(new_application.job_id).is_none() {
            return Err(AppError::NotFound("Job not found".to_string()));
        }
        if tables.applications.values().any(|a| {
            a.student_id == new_application.student_id && a.job_id == new_application.job_id
        }) {
            return Err(AppError::Conflict(
                "You have already applied to this job".to_string(),
            ));
        }

        let now = Utc::now();
        let application = tables.applications.insert_with(|id| Application {
            id,
            student_id: new_application.student_id,
            job_id: new_application.job_id,
            status: new_application.status,
            cover_letter: new_application.cover_letter,
            resume_url: new_application.resume_url,
            created_at: now,
            updated_at: now,
        });
        info!(
            "Student {} applied to job {} (application {})",
            application.student_id, application.job_id, application.id
        );
        Ok(application)
    }

    pub async fn update_application(
        &self,
        id: i32,
        patch: ApplicationPatch,
    ) -> Option<Application> {
        let mut tables = self.tables.write().await;
        let application = tables.applications.get_mut(id)?;
        patch.apply(application, Utc::now());
        info!("Application {id} is now {:?}", application.status);
        Some(application.clone())
    }

    /// Applications of one student, each with its job (None if the job was deleted).
    pub async fn applications_by_student(&self, student_id: i32) -> Vec<ApplicationWithJob> {
        let tables = self.tables.read().await;
        tables
            .applications
            .values()
            .filter(|a| a.student_id == student_id)
            .map(|a| ApplicationWithJob {
                application: a.clone(),
                job: tables.jobs.get(a.job_id).cloned(),
            })
            .collect()
    }

    pub async fn applications_by_job(&self, job_id: i32) -> Vec<ApplicationWithStudent> {
        let tables = self.tables.read().await;
        tables
            .applications
            .values()
            .filter(|a| a.job_id == job_id)
            .map(|a| ApplicationWithStudent {
                application: a.clone(),
                student: tables.student_profiles.get(a.student_id).cloned(),
            })
            .collect()
    }
}
