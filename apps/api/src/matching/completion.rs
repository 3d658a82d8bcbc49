use crate::models::profile::StudentProfile;

const SCALAR_FIELDS: usize = 9;
const COLLECTION_FIELDS: usize = 5;

/// Share of the 14 tracked profile fields that are filled in, as 0–100.
///
/// Scalars count when present and non-empty; collections count when non-empty.
/// `portfolio_url` is not tracked.
pub fn profile_completion(profile: &StudentProfile) -> u8 {
    let scalars = [
        filled(&profile.university),
        filled(&profile.degree),
        filled(&profile.field_of_study),
        profile.graduation_year.is_some_and(|y| y != 0),
        filled(&profile.resume_url),
        filled(&profile.linkedin_url),
        filled(&profile.bio),
        filled(&profile.phone_number),
        filled(&profile.location),
    ];
    let collections = [
        !profile.skills.is_empty(),
        !profile.experience.is_empty(),
        !profile.projects.is_empty(),
        !profile.educations.is_empty(),
        !profile.certifications.is_empty(),
    ];

    let completed = scalars.iter().chain(collections.iter()).filter(|f| **f).count();
    let total = SCALAR_FIELDS + COLLECTION_FIELDS;
    (100.0 * completed as f64 / total as f64).round() as u8
}

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::NewStudentProfile;
    use serde_json::json;

    fn empty_profile() -> StudentProfile {
        NewStudentProfile {
            user_id: 1,
            ..Default::default()
        }
        .into_profile(1)
    }

    fn full_profile() -> StudentProfile {
        NewStudentProfile {
            user_id: 1,
            university: Some("TU Delft".to_string()),
            degree: Some("BSc".to_string()),
            field_of_study: Some("Computer Science".to_string()),
            graduation_year: Some(2027),
            resume_url: Some("https://cdn.example.com/cv.pdf".to_string()),
            linkedin_url: Some("https://linkedin.com/in/someone".to_string()),
            portfolio_url: None,
            bio: Some("Systems enthusiast".to_string()),
            phone_number: Some("+31 6 0000 0000".to_string()),
            location: Some("Delft".to_string()),
            skills: vec!["Rust".to_string()],
            experience: vec![json!({ "company": "Acme" })],
            projects: vec![json!({ "name": "kv store" })],
            educations: vec![json!({ "institution": "TU Delft" })],
            certifications: vec![json!({ "name": "CKA" })],
        }
        .into_profile(1)
    }

    #[test]
    fn test_full_profile_is_100() {
        assert_eq!(profile_completion(&full_profile()), 100);
    }

    #[test]
    fn test_empty_profile_is_0() {
        assert_eq!(profile_completion(&empty_profile()), 0);
    }

    #[test]
    fn test_only_skills_is_7() {
        let mut profile = empty_profile();
        profile.skills = vec!["Python".to_string()];
        assert_eq!(profile_completion(&profile), 7);
    }

    #[test]
    fn test_empty_strings_do_not_count() {
        let mut profile = empty_profile();
        profile.bio = Some(String::new());
        profile.graduation_year = Some(0);
        assert_eq!(profile_completion(&profile), 0);
    }

    #[test]
    fn test_portfolio_not_tracked() {
        let mut profile = empty_profile();
        profile.portfolio_url = Some("https://example.dev".to_string());
        assert_eq!(profile_completion(&profile), 0);
    }

    #[test]
    fn test_half_filled_rounds() {
        // 7 of 14
        let mut profile = full_profile();
        profile.university = None;
        profile.degree = None;
        profile.field_of_study = None;
        profile.graduation_year = None;
        profile.skills.clear();
        profile.experience.clear();
        profile.projects.clear();
        assert_eq!(profile_completion(&profile), 50);
    }
}
