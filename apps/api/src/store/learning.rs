use chrono::Utc;
use serde_json::Value;
use tracing::info;

use super::MemStore;
use crate::errors::AppError;
use crate::models::learning::{LearningResource, NewLearningResource, SkillGapAnalysis};

impl MemStore {
    // ── Skill gap analyses ──────────────────────────────────────────────────

    /// The first analysis recorded for the student, if any.
    pub async fn skill_gap_for_student(&self, student_id: i32) -> Option<SkillGapAnalysis> {
        self.tables
            .read()
            .await
            .skill_gap_analyses
            .values()
            .find(|a| a.student_id == student_id)
            .cloned()
    }

    pub async fn create_skill_gap(
        &self,
        student_id: i32,
        results: Value,
    ) -> Result<SkillGapAnalysis, AppError> {
        let mut tables = self.tables.write().await;
        if tables.student_profiles.get(student_id).is_none() {
            return Err(AppError::NotFound("Student profile not found".to_string()));
        }

        let analysis = tables.skill_gap_analyses.insert_with(|id| SkillGapAnalysis {
            id,
            student_id,
            results,
            created_at: Utc::now(),
        });
        info!("Recorded skill gap analysis {} for student {student_id}", analysis.id);
        Ok(analysis)
    }

    // ── Learning resources ──────────────────────────────────────────────────

    pub async fn all_learning_resources(&self) -> Vec<LearningResource> {
        self.tables
            .read()
            .await
            .learning_resources
            .values()
            .cloned()
            .collect()
    }

    pub async fn create_learning_resource(&self, resource: NewLearningResource) -> LearningResource {
        self.tables
            .write()
            .await
            .learning_resources
            .insert_with(|id| resource.into_resource(id))
    }

    /// Case-insensitive match on the resource's skill tag.
    pub async fn learning_resources_by_skill(&self, skill_tag: &str) -> Vec<LearningResource> {
        let wanted = skill_tag.to_lowercase();
        self.tables
            .read()
            .await
            .learning_resources
            .values()
            .filter(|r| r.skill_tag.to_lowercase() == wanted)
            .cloned()
            .collect()
    }

    /// Resources whose tag is exactly one of the student's recorded skill gaps.
    pub async fn recommended_resources(&self, student_id: i32) -> Vec<LearningResource> {
        let Some(analysis) = self.skill_gap_for_student(student_id).await else {
            return Vec::new();
        };
        let gaps = analysis.skill_gaps();
        self.tables
            .read()
            .await
            .learning_resources
            .values()
            .filter(|r| gaps.contains(&r.skill_tag.as_str()))
            .cloned()
            .collect()
    }
}
