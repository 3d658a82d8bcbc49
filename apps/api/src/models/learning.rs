use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningResource {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub url: String,
    pub category: String,
    pub skill_tag: String,
    pub is_free: bool,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub rating: Option<f64>,
    pub rating_count: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLearningResource {
    pub title: String,
    pub description: String,
    pub url: String,
    pub category: String,
    pub skill_tag: String,
    #[serde(default = "default_true")]
    pub is_free: bool,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub rating: Option<f64>,
    pub rating_count: Option<i32>,
}

fn default_true() -> bool {
    true
}

impl NewLearningResource {
    pub fn into_resource(self, id: i32) -> LearningResource {
        LearningResource {
            id,
            title: self.title,
            description: self.description,
            url: self.url,
            category: self.category,
            skill_tag: self.skill_tag,
            is_free: self.is_free,
            price: self.price,
            image_url: self.image_url,
            rating: self.rating,
            rating_count: self.rating_count,
        }
    }
}

/// Free-form analysis results attached to a student. `results.skillGaps`
/// drives learning-resource recommendations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapAnalysis {
    pub id: i32,
    pub student_id: i32,
    pub results: Value,
    pub created_at: DateTime<Utc>,
}

impl SkillGapAnalysis {
    pub fn skill_gaps(&self) -> Vec<&str> {
        self.results
            .get("skillGaps")
            .and_then(Value::as_array)
            .map(|gaps| gaps.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Catalogue entries present on a fresh store.
pub fn seed_resources() -> Vec<NewLearningResource> {
    vec![
        NewLearningResource {
            title: "Machine Learning Fundamentals with Python".to_string(),
            description: "Learn the foundations of machine learning with practical Python examples and real-world datasets.".to_string(),
            url: "https://example.com/ml-fundamentals".to_string(),
            category: "Machine Learning".to_string(),
            skill_tag: "Machine Learning".to_string(),
            is_free: true,
            price: None,
            image_url: Some("https://images.unsplash.com/photo-1587620962725-abab7fe55159".to_string()),
            rating: Some(4.5),
            rating_count: Some(1245),
        },
        NewLearningResource {
            title: "AWS Cloud Practitioner Certification".to_string(),
            description: "Prepare for AWS Cloud Practitioner certification with comprehensive lessons and practice exams.".to_string(),
            url: "https://example.com/aws-certification".to_string(),
            category: "Cloud Computing".to_string(),
            skill_tag: "Cloud Computing".to_string(),
            is_free: false,
            price: Some("$49.99".to_string()),
            image_url: Some("https://images.unsplash.com/photo-1516321318423-f06f85e504b3".to_string()),
            rating: Some(4.0),
            rating_count: Some(876),
        },
        NewLearningResource {
            title: "Web Development Bootcamp".to_string(),
            description: "Complete web development bootcamp covering HTML, CSS, JavaScript, React, Node.js and more.".to_string(),
            url: "https://example.com/web-dev-bootcamp".to_string(),
            category: "Web Development".to_string(),
            skill_tag: "Web Development".to_string(),
            is_free: false,
            price: Some("$89.99".to_string()),
            image_url: Some("https://images.unsplash.com/photo-1517180102446-f3ece451e9d8".to_string()),
            rating: Some(4.8),
            rating_count: Some(3254),
        },
    ]
}
