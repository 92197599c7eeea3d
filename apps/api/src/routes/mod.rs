pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::gap::handlers as gap;
use crate::plan::handlers as plan;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("no such route".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Gap analysis
        .route("/skill-gap", post(gap::handle_skill_gap))
        .route("/skill-gap/compare", post(gap::handle_compare))
        .route("/skill-gap/resources/:skill", get(gap::handle_resources))
        // Development plan
        .route(
            "/skill-gap/development-plan",
            post(plan::handle_development_plan),
        )
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::gap::extractor::{SkillExtractor, TaxonomyExtractor};
    use crate::gap::pipeline::tests::{engine_with, FailingExtractor};

    const RESUME: &str = "Backend engineer: Python, SQL and Docker. Deployed services on AWS.";
    const JOB: &str = "Required Kubernetes experience. Kubernetes in production, must have Docker. \
        Python required. Nice to have: Terraform.";

    fn app_with(extractor: Arc<dyn SkillExtractor>) -> Router {
        build_router(AppState {
            config: Config::default(),
            engine: engine_with(extractor),
        })
    }

    fn app() -> Router {
        app_with(Arc::new(TaxonomyExtractor))
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn names(list: &Value, key: &str) -> Vec<String> {
        list.as_array()
            .unwrap()
            .iter()
            .map(|v| v[key].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["extractor"], "taxonomy");
        assert!(body.get("timestamp").is_none());
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, body) = send(app(), get("/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_skill_gap_report() {
        let req = post_json(
            "/skill-gap",
            json!({ "candidateResume": RESUME, "jobDescription": JOB }),
        );
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::OK);

        let match_score = body["overall_match_score"].as_f64().unwrap();
        let gap_score = body["skill_gap_score"].as_f64().unwrap();
        assert!((match_score + gap_score - 100.0).abs() < 0.02);
        assert_eq!(body["generated"], false);

        let missing = names(&body["missing_skills"], "name");
        assert_eq!(missing, vec!["Kubernetes", "Terraform"]);
        assert_eq!(body["missing_critical_skills_count"], 1);
        assert_eq!(body["training_recommendations"][0]["skill"], "Kubernetes");
        assert!(body["skill_gap_by_domain"]["cloud"].is_object());
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_skill_gap_echoes_ids_and_counts_critical() {
        let req = post_json(
            "/skill-gap",
            json!({
                "candidateResume": RESUME,
                "jobDescription": JOB,
                "candidateId": "cand-1",
                "job_id": "job-42"
            }),
        );
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["candidate_id"], "cand-1");
        assert_eq!(body["job_id"], "job-42");
        assert_eq!(body["critical_skills_count"], 3);
        assert_eq!(body["missing_critical_skills_count"], 1);

        let req = post_json(
            "/skill-gap",
            json!({ "candidateResume": RESUME, "jobDescription": JOB }),
        );
        let (_, body) = send(app(), req).await;
        assert!(body.get("candidate_id").is_none());
        assert!(body.get("job_id").is_none());
    }

    #[tokio::test]
    async fn test_skill_gap_requires_text() {
        let req = post_json("/skill-gap", json!({ "candidateResume": "  ", "jobDescription": JOB }));
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let req = post_json("/skill-gap", json!({ "candidateResume": RESUME }));
        let (status, _) = send(app(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_development_plan_within_horizon() {
        let req = post_json(
            "/skill-gap/development-plan",
            json!({ "candidateResume": RESUME, "jobDescription": JOB, "timeframeWeeks": 4 }),
        );
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::OK);

        assert_eq!(body["timeframe_available"], 4);
        assert_eq!(body["total_missing_skills"], 2);
        assert_eq!(body["skills_covered"], 1);
        assert_eq!(body["critical_skills_covered"], 1);
        assert_eq!(body["critical_skills_not_covered"], 0);

        let entry = &body["development_plan"][0];
        assert_eq!(entry["skill"], "Kubernetes");
        assert_eq!(entry["start_week"], 1);
        assert_eq!(entry["end_week"], 4);
        assert_eq!(entry["is_partial_training"], true);
        assert_eq!(names(&body["unscheduled_skills"], "name"), vec!["Terraform"]);
        assert_eq!(body["weekly_activity"].as_array().unwrap().len(), 4);

        let before = body["skill_gap_score_before"].as_f64().unwrap();
        let after = body["estimated_skill_gap_score_after"].as_f64().unwrap();
        assert!(after < before);
    }

    #[tokio::test]
    async fn test_development_plan_zero_horizon_is_not_an_error() {
        let req = post_json(
            "/skill-gap/development-plan",
            json!({ "candidate_resume": RESUME, "job_description": JOB, "timeframe_weeks": 0 }),
        );
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills_covered"], 0);
        assert_eq!(body["skills_not_covered"], 2);
        assert!(body["development_plan"].as_array().unwrap().is_empty());
        assert_eq!(
            body["skill_gap_score_before"],
            body["estimated_skill_gap_score_after"]
        );
    }

    #[tokio::test]
    async fn test_development_plan_defaults_horizon() {
        let req = post_json(
            "/skill-gap/development-plan",
            json!({ "candidateResume": RESUME, "jobDescription": JOB, "timeframeWeeks": null }),
        );
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timeframe_available"], 12);
    }

    #[tokio::test]
    async fn test_development_plan_rejects_fractional_horizon() {
        let req = post_json(
            "/skill-gap/development-plan",
            json!({ "candidateResume": RESUME, "jobDescription": JOB, "timeframeWeeks": 2.5 }),
        );
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_degraded_extraction_still_plans() {
        let req = post_json(
            "/skill-gap/development-plan",
            json!({ "candidateResume": RESUME, "jobDescription": JOB, "timeframeWeeks": 8 }),
        );
        let (status, first) = send(app_with(Arc::new(FailingExtractor)), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["generated"], true);
        assert_eq!(first["warnings"].as_array().unwrap().len(), 1);

        let req = post_json(
            "/skill-gap/development-plan",
            json!({ "candidateResume": RESUME, "jobDescription": JOB, "timeframeWeeks": 8 }),
        );
        let (_, second) = send(app_with(Arc::new(FailingExtractor)), req).await;
        assert_eq!(first["development_plan"], second["development_plan"]);
    }

    #[tokio::test]
    async fn test_compare_ranks_candidates() {
        let req = post_json(
            "/skill-gap/compare",
            json!({
                "candidateResumes": {
                    "weak": "Customer support, communication.",
                    "strong": "Python, Docker and Kubernetes operator. Terraform modules."
                },
                "jobDescription": JOB,
                "jobId": "job-42"
            }),
        );
        let (status, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job_id"], "job-42");
        assert_eq!(body["candidate_count"], 2);
        assert_eq!(
            names(&body["ranked_candidates"], "candidate_id"),
            vec!["strong", "weak"]
        );
        assert_eq!(
            body["critical_skills"],
            json!(["Python", "Docker", "Kubernetes"])
        );

        let detailed = body["detailed_analyses"].as_object().unwrap();
        let ids: Vec<&String> = detailed.keys().collect();
        assert_eq!(ids, vec!["strong", "weak"]);
        let strong = &detailed["strong"];
        assert_eq!(strong["candidate_id"], "strong");
        assert_eq!(strong["job_id"], "job-42");
        assert_eq!(strong["critical_skills_count"], 3);
        assert_eq!(
            strong["overall_match_score"],
            body["ranked_candidates"][0]["match_score"]
        );
        assert!(detailed["weak"]["missing_skills"].as_array().unwrap().len() >= 3);
    }

    #[tokio::test]
    async fn test_compare_requires_candidates() {
        let req = post_json(
            "/skill-gap/compare",
            json!({ "candidateResumes": {}, "jobDescription": JOB }),
        );
        let (status, _) = send(app(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_resources_lookup() {
        let (status, body) = send(app(), get("/skill-gap/resources/python")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["curated"], true);
        assert!(body["resources"]["courses"].is_array());
        assert!(body.get("generated").is_none());

        let (status, body) = send(app(), get("/skill-gap/resources/Cobol")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["curated"], false);
        assert!(body["resources"]["suggestion"].is_string());
    }
}
