//! Shared store setups for unit tests.

use crate::models::job::NewJob;
use crate::models::profile::NewEmployerProfile;
use crate::models::user::{NewUser, UserRole};
use crate::store::MemStore;

/// Store with one employer (user 1, employer profile 1).
pub(crate) async fn store_with_employer() -> MemStore {
    let store = MemStore::new();
    store
        .create_user(NewUser {
            email: "hr@acme.test".to_string(),
            password: "pw".to_string(),
            name: "Acme HR".to_string(),
            role: UserRole::Employer,
        })
        .await
        .unwrap();
    store
        .create_employer_profile(NewEmployerProfile {
            user_id: 1,
            company_name: "Acme".to_string(),
            industry: None,
            company_size: None,
            description: None,
            website_url: None,
            logo_url: None,
            location: None,
            phone_number: None,
        })
        .await
        .unwrap();
    store
}

pub(crate) fn new_job(title: &str, skills: &[&str]) -> NewJob {
    NewJob {
        employer_id: 1,
        title: title.to_string(),
        description: "Internship".to_string(),
        location: "Remote".to_string(),
        is_remote: true,
        is_hybrid: false,
        requirements: vec![],
        skills: skills.iter().map(|s| s.to_string()).collect(),
        duration: Some("3 months".to_string()),
        salary: None,
        expires_at: None,
    }
}

