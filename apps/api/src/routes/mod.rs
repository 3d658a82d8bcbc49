pub mod applications;
pub mod auth;
pub mod health;
pub mod jobs;
pub mod learning;
pub mod messages;
pub mod profiles;

use axum::{
    extract::{FromRequest, FromRequestParts},
    routing::{get, patch, post},
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::AppError;
use crate::matching::handlers as matching;
use crate::state::AppState;

/// `Json` extractor whose rejections render as `AppError` bodies.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Query` extractor whose rejections render as `AppError` bodies.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Deserializes a JSON body, reporting shape errors as 400 validation errors.
pub(crate) fn parse_body<T: DeserializeOwned>(body: Value) -> Result<T, AppError> {
    serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/health", get(health::health_handler))
        // Auth & users
        .route("/api/auth/register", post(auth::handle_register))
        .route("/api/auth/login", post(auth::handle_login))
        .route("/api/users/:id", get(auth::handle_get_user))
        // Profiles
        .route(
            "/api/student-profiles",
            post(profiles::handle_create_student_profile),
        )
        .route(
            "/api/student-profiles/user/:user_id",
            get(profiles::handle_get_student_profile_by_user),
        )
        .route(
            "/api/student-profiles/:id",
            patch(profiles::handle_update_student_profile),
        )
        .route(
            "/api/employer-profiles",
            post(profiles::handle_create_employer_profile),
        )
        .route(
            "/api/employer-profiles/user/:user_id",
            get(profiles::handle_get_employer_profile_by_user),
        )
        .route(
            "/api/employer-profiles/:id",
            patch(profiles::handle_update_employer_profile),
        )
        // Jobs
        .route(
            "/api/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route("/api/jobs/search", get(jobs::handle_search_jobs))
        .route(
            "/api/jobs/employer/:employer_id",
            get(jobs::handle_jobs_by_employer),
        )
        .route(
            "/api/jobs/:id",
            get(jobs::handle_get_job)
                .patch(jobs::handle_update_job)
                .delete(jobs::handle_delete_job),
        )
        // Applications
        .route(
            "/api/applications",
            post(applications::handle_create_application),
        )
        .route(
            "/api/applications/student/:student_id",
            get(applications::handle_applications_by_student),
        )
        .route(
            "/api/applications/job/:job_id",
            get(applications::handle_applications_by_job),
        )
        .route(
            "/api/applications/:id",
            patch(applications::handle_update_application),
        )
        // Matching
        .route(
            "/api/matching/jobs/:student_id",
            get(matching::handle_matching_jobs),
        )
        .route(
            "/api/matching/students/:job_id",
            get(matching::handle_matching_students),
        )
        .route(
            "/api/matching/score/:student_id/:job_id",
            get(matching::handle_get_score),
        )
        .route("/api/matching/calculate", post(matching::handle_calculate))
        // Skill gaps & learning
        .route(
            "/api/skill-gap/:student_id",
            get(learning::handle_get_skill_gap).post(learning::handle_create_skill_gap),
        )
        .route(
            "/api/learning-resources",
            get(learning::handle_list_resources).post(learning::handle_create_resource),
        )
        .route(
            "/api/learning-resources/skill/:skill_tag",
            get(learning::handle_resources_by_skill),
        )
        .route(
            "/api/learning-resources/recommended/:student_id",
            get(learning::handle_recommended_resources),
        )
        // Messages
        .route("/api/messages", post(messages::handle_send_message))
        .route(
            "/api/messages/unread/:user_id",
            get(messages::handle_unread_count),
        )
        .route("/api/messages/:id/read", patch(messages::handle_mark_read))
        .route(
            "/api/messages/:id/:other_id",
            get(messages::handle_conversation),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(AppState::in_memory(Config::default()))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Registers a student (user 1, profile 1) and an employer (user 2, profile 1).
    async fn seed_marketplace(app: &Router, student_skills: Value) {
        let (status, _) = send(
            app,
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "stu@uni.test", "password": "pw", "name": "Stu" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = send(
            app,
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "hr@acme.test", "password": "pw", "name": "HR", "role": "employer" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(
            app,
            "POST",
            "/api/student-profiles",
            Some(json!({ "userId": 1, "skills": student_skills })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = send(
            app,
            "POST",
            "/api/employer-profiles",
            Some(json!({ "userId": 2, "companyName": "Acme" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    async fn post_job(app: &Router, title: &str, skills: Value) -> Value {
        let (status, job) = send(
            app,
            "POST",
            "/api/jobs",
            Some(json!({
                "employerId": 1,
                "title": title,
                "description": "Summer internship",
                "location": "Remote",
                "skills": skills
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        job
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["matchScores"], "memory");
    }

    #[tokio::test]
    async fn test_end_to_end_job_matching_scores_67() {
        let app = app();
        seed_marketplace(&app, json!(["Python", "React"])).await;
        post_job(&app, "Full stack", json!(["Python", "React", "SQL"])).await;

        let (status, body) = send(&app, "GET", "/api/matching/jobs/1?limit=5", None).await;
        assert_eq!(status, StatusCode::OK);
        let matches = body.as_array().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["score"], 67.0);
        assert_eq!(matches[0]["job"]["title"], "Full stack");
    }

    #[tokio::test]
    async fn test_calculate_upsert_overrides_on_demand_score() {
        let app = app();
        seed_marketplace(&app, json!(["Python"])).await;
        post_job(&app, "A", json!(["Python"])).await;
        post_job(&app, "B", json!(["Go"])).await;

        for score in [10.0, 95.5] {
            let (status, row) = send(
                &app,
                "POST",
                "/api/matching/calculate",
                Some(json!({ "studentId": 1, "jobId": 2, "score": score })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(row["score"], score);
            assert_eq!(row["id"], 1);
        }

        let (status, stored) = send(&app, "GET", "/api/matching/score/1/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stored["score"], 95.5);
        let (status, _) = send(&app, "GET", "/api/matching/score/2/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = send(&app, "GET", "/api/matching/jobs/1", None).await;
        let ranked: Vec<(i64, f64)> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|m| (m["job"]["id"].as_i64().unwrap(), m["score"].as_f64().unwrap()))
            .collect();
        assert_eq!(ranked, vec![(2, 95.5), (1, 100.0)]);
    }

    #[tokio::test]
    async fn test_calculate_requires_all_fields() {
        let (status, body) = send(
            &app(),
            "POST",
            "/api/matching/calculate",
            Some(json!({ "studentId": 1, "jobId": 2 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_extractor_rejections_use_error_body() {
        let app = app();

        let malformed = Request::builder()
            .method("POST")
            .uri("/api/auth/register")
            .header("content-type", "application/json")
            .body(Body::from("{\"email\":"))
            .unwrap();
        let no_content_type = Request::builder()
            .method("POST")
            .uri("/api/matching/calculate")
            .body(Body::from(r#"{"studentId":1,"jobId":1,"score":5}"#))
            .unwrap();
        let bad_query = Request::builder()
            .uri("/api/jobs/search?isRemote=yes")
            .body(Body::empty())
            .unwrap();

        for request in [malformed, no_content_type, bad_query] {
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn test_matching_rejects_non_numeric_ids_and_limits() {
        let app = app();
        let (status, _) = send(&app, "GET", "/api/matching/jobs/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&app, "GET", "/api/matching/students/1?limit=ten", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_subjects_return_empty_lists() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/matching/jobs/42", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
        let (status, body) = send(&app, "GET", "/api/matching/students/42", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_inactive_jobs_excluded_and_limit_respected() {
        let app = app();
        seed_marketplace(&app, json!(["Rust"])).await;
        post_job(&app, "A", json!(["Rust"])).await;
        post_job(&app, "B", json!(["Rust", "Go"])).await;
        post_job(&app, "C", json!(["Rust"])).await;

        let (status, _) = send(
            &app,
            "PATCH",
            "/api/jobs/1",
            Some(json!({ "isActive": false })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, "GET", "/api/matching/jobs/1?limit=1", None).await;
        let matches = body.as_array().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["job"]["id"], 3);

        let (_, body) = send(&app, "GET", "/api/matching/jobs/1", None).await;
        let ids: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["job"]["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[tokio::test]
    async fn test_students_for_job_ranking() {
        let app = app();
        seed_marketplace(&app, json!(["A", "B"])).await;
        post_job(&app, "A only", json!(["A"])).await;

        let (status, body) = send(&app, "GET", "/api/matching/students/1", None).await;
        assert_eq!(status, StatusCode::OK);
        let matches = body.as_array().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["student"]["id"], 1);
        assert_eq!(matches[0]["score"], 50.0);
    }

    #[tokio::test]
    async fn test_register_login_flow() {
        let app = app();
        let (status, user) = send(
            &app,
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "a@b.test", "password": "secret", "name": "A" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(user.get("password").is_none());
        assert_eq!(user["role"], "student");

        let (status, _) = send(
            &app,
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "a@b.test", "password": "x", "name": "B" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(
            &app,
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "a@b.test", "password": "wrong" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, logged_in) = send(
            &app,
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "a@b.test", "password": "secret" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(logged_in["id"], 1);

        let (status, _) = send(&app, "POST", "/api/auth/login", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_profile_completion_exposed_and_recomputed() {
        let app = app();
        seed_marketplace(&app, json!(["Python"])).await;

        let (_, profile) = send(&app, "GET", "/api/student-profiles/user/1", None).await;
        assert_eq!(profile["profileCompletionPercentage"], 7);

        let (status, profile) = send(
            &app,
            "PATCH",
            "/api/student-profiles/1",
            Some(json!({ "bio": "Hi", "location": "Oslo" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile["profileCompletionPercentage"], 21);
    }

    #[tokio::test]
    async fn test_application_lifecycle() {
        let app = app();
        seed_marketplace(&app, json!([])).await;
        post_job(&app, "A", json!([])).await;

        let body = json!({ "studentId": 1, "jobId": 1, "coverLetter": "Hello" });
        let (status, application) =
            send(&app, "POST", "/api/applications", Some(body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(application["status"], "applied");

        let (status, _) = send(&app, "POST", "/api/applications", Some(body)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, updated) = send(
            &app,
            "PATCH",
            "/api/applications/1",
            Some(json!({ "status": "in_review" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["status"], "in_review");

        let (_, listed) = send(&app, "GET", "/api/applications/job/1", None).await;
        assert_eq!(listed[0]["student"]["id"], 1);
        assert_eq!(listed[0]["status"], "in_review");
    }

    #[tokio::test]
    async fn test_messaging_routes() {
        let app = app();
        seed_marketplace(&app, json!([])).await;

        let (status, _) = send(
            &app,
            "POST",
            "/api/messages",
            Some(json!({ "senderId": 2, "receiverId": 1, "content": "Interview?" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, unread) = send(&app, "GET", "/api/messages/unread/1", None).await;
        assert_eq!(unread["count"], 1);

        let (_, convo) = send(&app, "GET", "/api/messages/1/2", None).await;
        assert_eq!(convo.as_array().unwrap().len(), 1);

        let (status, ok) = send(&app, "PATCH", "/api/messages/1/read", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ok["success"], true);

        let (_, unread) = send(&app, "GET", "/api/messages/unread/1", None).await;
        assert_eq!(unread["count"], 0);

        let (status, _) = send(&app, "PATCH", "/api/messages/9/read", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_job_crud_and_search() {
        let app = app();
        seed_marketplace(&app, json!([])).await;
        post_job(&app, "Backend Intern", json!(["Rust"])).await;
        post_job(&app, "Design Intern", json!(["Figma"])).await;

        let (_, hits) = send(&app, "GET", "/api/jobs/search?query=backend", None).await;
        assert_eq!(hits.as_array().unwrap().len(), 1);

        let (_, hits) = send(&app, "GET", "/api/jobs/search?skills=Figma,Go", None).await;
        assert_eq!(hits[0]["title"], "Design Intern");

        let (status, _) = send(&app, "DELETE", "/api/jobs/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "GET", "/api/jobs/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "GET", "/api/jobs/nope", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, all) = send(&app, "GET", "/api/jobs", None).await;
        assert_eq!(all.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_skill_gap_recommendations() {
        let app = app();
        seed_marketplace(&app, json!([])).await;

        let (status, _) = send(&app, "GET", "/api/skill-gap/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "POST",
            "/api/skill-gap/1",
            Some(json!({ "results": { "skillGaps": ["Machine Learning"] } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, recommended) =
            send(&app, "GET", "/api/learning-resources/recommended/1", None).await;
        assert_eq!(recommended.as_array().unwrap().len(), 1);
        assert_eq!(recommended[0]["skillTag"], "Machine Learning");

        let (_, all) = send(&app, "GET", "/api/learning-resources", None).await;
        assert_eq!(all.as_array().unwrap().len(), 3);
    }
}
