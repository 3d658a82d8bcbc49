use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub id: i32,
    pub user_id: i32,
    pub university: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub graduation_year: Option<i32>,
    pub resume_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub bio: Option<String>,
    pub phone_number: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub experience: Vec<Value>,
    pub projects: Vec<Value>,
    pub educations: Vec<Value>,
    pub certifications: Vec<Value>,
    /// Derived on every create/update, never accepted from clients.
    pub profile_completion_percentage: u8,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudentProfile {
    pub user_id: i32,
    pub university: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub graduation_year: Option<i32>,
    pub resume_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub bio: Option<String>,
    pub phone_number: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<Value>,
    #[serde(default)]
    pub projects: Vec<Value>,
    #[serde(default)]
    pub educations: Vec<Value>,
    #[serde(default)]
    pub certifications: Vec<Value>,
}

impl NewStudentProfile {
    /// Builds the stored row. Completion is filled in by the store.
    pub fn into_profile(self, id: i32) -> StudentProfile {
        StudentProfile {
            id,
            user_id: self.user_id,
            university: self.university,
            degree: self.degree,
            field_of_study: self.field_of_study,
            graduation_year: self.graduation_year,
            resume_url: self.resume_url,
            linkedin_url: self.linkedin_url,
            portfolio_url: self.portfolio_url,
            bio: self.bio,
            phone_number: self.phone_number,
            location: self.location,
            skills: self.skills,
            experience: self.experience,
            projects: self.projects,
            educations: self.educations,
            certifications: self.certifications,
            profile_completion_percentage: 0,
        }
    }
}

/// Partial update. Absent (or null) fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfilePatch {
    pub university: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub graduation_year: Option<i32>,
    pub resume_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub bio: Option<String>,
    pub phone_number: Option<String>,
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience: Option<Vec<Value>>,
    pub projects: Option<Vec<Value>>,
    pub educations: Option<Vec<Value>>,
    pub certifications: Option<Vec<Value>>,
}

impl StudentProfilePatch {
    pub fn apply(self, profile: &mut StudentProfile) {
        merge(&mut profile.university, self.university);
        merge(&mut profile.degree, self.degree);
        merge(&mut profile.field_of_study, self.field_of_study);
        merge(&mut profile.graduation_year, self.graduation_year);
        merge(&mut profile.resume_url, self.resume_url);
        merge(&mut profile.linkedin_url, self.linkedin_url);
        merge(&mut profile.portfolio_url, self.portfolio_url);
        merge(&mut profile.bio, self.bio);
        merge(&mut profile.phone_number, self.phone_number);
        merge(&mut profile.location, self.location);
        if let Some(skills) = self.skills {
            profile.skills = skills;
        }
        if let Some(experience) = self.experience {
            profile.experience = experience;
        }
        if let Some(projects) = self.projects {
            profile.projects = projects;
        }
        if let Some(educations) = self.educations {
            profile.educations = educations;
        }
        if let Some(certifications) = self.certifications {
            profile.certifications = certifications;
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerProfile {
    pub id: i32,
    pub user_id: i32,
    pub company_name: String,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub description: Option<String>,
    pub website_url: Option<String>,
    pub logo_url: Option<String>,
    pub location: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployerProfile {
    pub user_id: i32,
    pub company_name: String,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub description: Option<String>,
    pub website_url: Option<String>,
    pub logo_url: Option<String>,
    pub location: Option<String>,
    pub phone_number: Option<String>,
}

impl NewEmployerProfile {
    pub fn into_profile(self, id: i32) -> EmployerProfile {
        EmployerProfile {
            id,
            user_id: self.user_id,
            company_name: self.company_name,
            industry: self.industry,
            company_size: self.company_size,
            description: self.description,
            website_url: self.website_url,
            logo_url: self.logo_url,
            location: self.location,
            phone_number: self.phone_number,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerProfilePatch {
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub description: Option<String>,
    pub website_url: Option<String>,
    pub logo_url: Option<String>,
    pub location: Option<String>,
    pub phone_number: Option<String>,
}

impl EmployerProfilePatch {
    pub fn apply(self, profile: &mut EmployerProfile) {
        if let Some(company_name) = self.company_name {
            profile.company_name = company_name;
        }
        merge(&mut profile.industry, self.industry);
        merge(&mut profile.company_size, self.company_size);
        merge(&mut profile.description, self.description);
        merge(&mut profile.website_url, self.website_url);
        merge(&mut profile.logo_url, self.logo_url);
        merge(&mut profile.location, self.location);
        merge(&mut profile.phone_number, self.phone_number);
    }
}

pub(crate) fn merge<T>(slot: &mut Option<T>, update: Option<T>) {
    if update.is_some() {
        *slot = update;
    }
}
