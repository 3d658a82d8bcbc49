use tracing::info;

use super::MemStore;
use crate::errors::AppError;
use crate::matching::completion::profile_completion;
use crate::models::profile::{
    EmployerProfile, EmployerProfilePatch, NewEmployerProfile, NewStudentProfile,
    StudentProfile, StudentProfilePatch,
};

impl MemStore {
    // ── Student profiles ────────────────────────────────────────────────────

    pub async fn get_student_profile(&self, id: i32) -> Option<StudentProfile> {
        self.tables.read().await.student_profiles.get(id).cloned()
    }

    pub async fn get_student_profile_by_user_id(&self, user_id: i32) -> Option<StudentProfile> {
        self.tables
            .read()
            .await
            .student_profiles
            .values()
            .find(|p| p.user_id == user_id)
            .cloned()
    }

    pub async fn all_student_profiles(&self) -> Vec<StudentProfile> {
        self.tables
            .read()
            .await
            .student_profiles
            .values()
            .cloned()
            .collect()
    }

    /// Creates the profile for an existing user. One profile per user.
    pub async fn create_student_profile(
        &self,
        new_profile: NewStudentProfile,
    ) -> Result<StudentProfile, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.get(new_profile.user_id).is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        if tables
            .student_profiles
            .values()
            .any(|p| p.user_id == new_profile.user_id)
        {
            return Err(AppError::Conflict(
                "Student profile already exists for this user".to_string(),
            ));
        }

        let profile = tables.student_profiles.insert_with(|id| {
            let mut profile = new_profile.into_profile(id);
            profile.profile_completion_percentage = profile_completion(&profile);
            profile
        });
        info!(
            "Created student profile {} ({}% complete)",
            profile.id, profile.profile_completion_percentage
        );
        Ok(profile)
    }

    /// Merges the patch and recomputes completion. Stored match scores are left as-is.
    pub async fn update_student_profile(
        &self,
        id: i32,
        patch: StudentProfilePatch,
    ) -> Option<StudentProfile> {
        let mut tables = self.tables.write().await;
        let profile = tables.student_profiles.get_mut(id)?;
        patch.apply(profile);
        profile.profile_completion_percentage = profile_completion(profile);
        Some(profile.clone())
    }

    // ── Employer profiles ───────────────────────────────────────────────────

    pub async fn get_employer_profile_by_user_id(&self, user_id: i32) -> Option<EmployerProfile> {
        self.tables
            .read()
            .await
            .employer_profiles
            .values()
            .find(|p| p.user_id == user_id)
            .cloned()
    }

    pub async fn create_employer_profile(
        &self,
        new_profile: NewEmployerProfile,
    ) -> Result<EmployerProfile, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.get(new_profile.user_id).is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        if tables
            .employer_profiles
            .values()
            .any(|p| p.user_id == new_profile.user_id)
        {
            return Err(AppError::Conflict(
                "Employer profile already exists for this user".to_string(),
            ));
        }

        let profile = tables
            .employer_profiles
            .insert_with(|id| new_profile.into_profile(id));
        info!("Created employer profile {} ({})", profile.id, profile.company_name);
        Ok(profile)
    }

    pub async fn update_employer_profile(
        &self,
        id: i32,
        patch: EmployerProfilePatch,
    ) -> Option<EmployerProfile> {
        let mut tables = self.tables.write().await;
        let profile = tables.employer_profiles.get_mut(id)?;
        patch.apply(profile);
        Some(profile.clone())
    }
}
