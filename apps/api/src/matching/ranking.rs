//! Top-N matches in either direction.
//!
//! Algorithm (jobs for a student; students for a job mirrors it):
//! 1. Persisted scores for the subject, resolved to live targets
//!    (missing or inactive jobs dropped), sorted, truncated to `limit`.
//! 2. If short of `limit`, targets with no persisted score for the subject
//!    are scored on demand and appended in rank order. On-demand scores are
//!    never written back to the score store.
//!
//! Ordering: score descending, ties by ascending target id.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::errors::AppError;
use crate::matching::comparator::score_skills;
use crate::matching::score_store::MatchScoreStore;
use crate::models::job::Job;
use crate::models::match_score::MatchScore;
use crate::models::profile::StudentProfile;
use crate::store::MemStore;

#[derive(Debug, Clone, Serialize)]
pub struct JobMatch {
    pub job: Job,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentMatch {
    pub student: StudentProfile,
    pub score: f64,
}

fn rank_order(a_score: f64, a_id: i32, b_score: f64, b_id: i32) -> Ordering {
    b_score.total_cmp(&a_score).then(a_id.cmp(&b_id))
}

/// Ranks jobs for one student from a snapshot of jobs and the student's persisted scores.
///
/// `jobs` may include inactive postings; they are never returned.
pub fn rank_jobs_for_student(
    student: &StudentProfile,
    jobs: &[Job],
    persisted: &[MatchScore],
    limit: usize,
) -> Vec<JobMatch> {
    let by_id: HashMap<i32, &Job> = jobs.iter().map(|j| (j.id, j)).collect();
    let covered: HashSet<i32> = persisted
        .iter()
        .filter(|s| s.student_id == student.id)
        .map(|s| s.job_id)
        .collect();

    let mut ranked: Vec<JobMatch> = persisted
        .iter()
        .filter(|s| s.student_id == student.id)
        .filter_map(|s| {
            by_id
                .get(&s.job_id)
                .filter(|job| job.is_active)
                .map(|job| JobMatch {
                    job: (*job).clone(),
                    score: s.score,
                })
        })
        .collect();
    ranked.sort_by(|a, b| rank_order(a.score, a.job.id, b.score, b.job.id));
    ranked.truncate(limit);

    if ranked.len() < limit {
        let mut on_demand: Vec<JobMatch> = jobs
            .iter()
            .filter(|job| job.is_active && !covered.contains(&job.id))
            .map(|job| JobMatch {
                job: job.clone(),
                score: score_skills(&student.skills, &job.skills),
            })
            .collect();
        on_demand.sort_by(|a, b| rank_order(a.score, a.job.id, b.score, b.job.id));
        on_demand.truncate(limit - ranked.len());

        debug!(
            "Student {}: {} persisted, {} on-demand job matches",
            student.id,
            ranked.len(),
            on_demand.len()
        );
        ranked.extend(on_demand);
    }

    ranked
}

/// Ranks students for one job. The job's skills are the subject and each
/// student's skills the target, so the student's skill count is the denominator.
///
/// A job with no skills has nothing to compare; on-demand candidates then score
/// their profile completion percentage instead.
pub fn rank_students_for_job(
    job: &Job,
    students: &[StudentProfile],
    persisted: &[MatchScore],
    limit: usize,
) -> Vec<StudentMatch> {
    let by_id: HashMap<i32, &StudentProfile> = students.iter().map(|s| (s.id, s)).collect();
    let covered: HashSet<i32> = persisted
        .iter()
        .filter(|s| s.job_id == job.id)
        .map(|s| s.student_id)
        .collect();

    let mut ranked: Vec<StudentMatch> = persisted
        .iter()
        .filter(|s| s.job_id == job.id)
        .filter_map(|s| {
            by_id.get(&s.student_id).map(|student| StudentMatch {
                student: (*student).clone(),
                score: s.score,
            })
        })
        .collect();
    ranked.sort_by(|a, b| rank_order(a.score, a.student.id, b.score, b.student.id));
    ranked.truncate(limit);

    if ranked.len() < limit {
        let mut on_demand: Vec<StudentMatch> = students
            .iter()
            .filter(|student| !covered.contains(&student.id))
            .map(|student| {
                let score = if job.skills.is_empty() {
                    f64::from(student.profile_completion_percentage)
                } else {
                    score_skills(&job.skills, &student.skills)
                };
                StudentMatch {
                    student: student.clone(),
                    score,
                }
            })
            .collect();
        on_demand.sort_by(|a, b| rank_order(a.score, a.student.id, b.score, b.student.id));
        on_demand.truncate(limit - ranked.len());

        debug!(
            "Job {}: {} persisted, {} on-demand student matches",
            job.id,
            ranked.len(),
            on_demand.len()
        );
        ranked.extend(on_demand);
    }

    ranked
}

/// Top `limit` jobs for a student. Unknown students yield an empty list.
pub async fn top_matches_for_student(
    store: &MemStore,
    scores: &dyn MatchScoreStore,
    student_id: i32,
    limit: usize,
) -> Result<Vec<JobMatch>, AppError> {
    let Some(student) = store.get_student_profile(student_id).await else {
        debug!("Student {student_id} not found; no job matches");
        return Ok(Vec::new());
    };
    let persisted = scores.scores_for_student(student_id).await?;
    let jobs = store.all_jobs().await;
    Ok(rank_jobs_for_student(&student, &jobs, &persisted, limit))
}

/// Top `limit` students for a job. Unknown jobs yield an empty list.
pub async fn top_matches_for_job(
    store: &MemStore,
    scores: &dyn MatchScoreStore,
    job_id: i32,
    limit: usize,
) -> Result<Vec<StudentMatch>, AppError> {
    let Some(job) = store.get_job(job_id).await else {
        debug!("Job {job_id} not found; no student matches");
        return Ok(Vec::new());
    };
    let persisted = scores.scores_for_job(job_id).await?;
    let students = store.all_student_profiles().await;
    Ok(rank_students_for_job(&job, &students, &persisted, limit))
}
