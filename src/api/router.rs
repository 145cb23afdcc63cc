//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`. No auth or rate limiting — the
//! service binds to loopback and holds no credentials of its own.

use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the API router.
pub fn api_router(ctx: ApiContext) -> Router {
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/intake", get(endpoints::intake::fields))
        .route(
            "/assessment",
            get(endpoints::assessment::current).post(endpoints::assessment::submit),
        )
        .route("/assessment/clear", post(endpoints::assessment::clear))
        .with_state(ctx);

    Router::new().nest("/api", routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::core_state::CoreState;
    use crate::prediction::{MockRiskModel, RiskModel, PREDICTION_FAILED_MESSAGE};

    /// Reference record: a 50-year-old asymptomatic male with
    /// unremarkable metrics.
    const SCENARIO_RECORD: &str = r#"{
        "Age": 50, "Sex": "Male", "ChestPainType": "Asymptomatic",
        "RestingBP": 120, "Cholesterol": 200, "FastingBS": 0,
        "RestingECG": "Normal", "MaxHR": 150, "ExerciseAngina": "No",
        "Oldpeak": 1.0, "ST_Slope": "Flat"
    }"#;

    const MODERATE_REPLY: &str = r#"{
        "prediction": "Moderate Risk",
        "confidence": 0.72,
        "explanation": "Borderline blood pressure for an asymptomatic patient.",
        "recommendations": ["A", "B", "C"]
    }"#;

    fn test_app(model: impl RiskModel + 'static) -> (Router, Arc<CoreState>) {
        let core = Arc::new(CoreState::new());
        let ctx = ApiContext::new(core.clone(), Arc::new(model));
        (api_router(ctx), core)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: axum::http::Response<Body>) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 65536)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_response_shape() {
        let (app, _core) = test_app(MockRiskModel::replying(MODERATE_REPLY));
        let response = app.oneshot(get_request("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["model"], "mock");
        assert_eq!(json["credential_configured"], true);
        assert!(!json["version"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn intake_lists_all_eleven_fields_with_defaults() {
        let (app, _core) = test_app(MockRiskModel::replying(MODERATE_REPLY));
        let response = app.oneshot(get_request("/api/intake")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["fields"].as_array().unwrap().len(), 11);
        assert_eq!(json["defaults"]["Age"], 50);
        assert_eq!(json["defaults"]["ChestPainType"], "Asymptomatic");

        let age = &json["fields"][0];
        assert_eq!(age["name"], "Age");
        assert_eq!(age["kind"], "number");
        assert_eq!(age["min"], 1.0);
        assert_eq!(age["max"], 120.0);
    }

    #[tokio::test]
    async fn fresh_session_is_idle() {
        let (app, _core) = test_app(MockRiskModel::replying(MODERATE_REPLY));
        let response = app.oneshot(get_request("/api/assessment")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["phase"], "idle");
        assert!(json.get("result").is_none());
        assert!(json.get("error").is_none());
    }

    // Scenario A: valid record, mock service succeeds — settled with the
    // service's values unchanged and confidence displayed as "72%".
    #[tokio::test]
    async fn submit_success_settles_with_result() {
        let (app, _core) = test_app(MockRiskModel::replying(MODERATE_REPLY));
        let response = app
            .oneshot(post_json("/api/assessment", SCENARIO_RECORD))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["phase"], "settled");
        assert_eq!(json["result"]["risk"], "Moderate Risk");
        assert_eq!(json["result"]["confidence"], 0.72);
        assert_eq!(json["result"]["confidence_percent"], "72%");
        assert_eq!(json["result"]["recommendations"].as_array().unwrap().len(), 3);
        assert!(json.get("error").is_none(), "no error beside a result");
    }

    // Scenario B: transport failure — settled with the fixed generic
    // message, no result shown.
    #[tokio::test]
    async fn submit_transport_failure_settles_with_fixed_message() {
        let (app, _core) = test_app(MockRiskModel::failing());
        let response = app
            .oneshot(post_json("/api/assessment", SCENARIO_RECORD))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["phase"], "settled");
        assert_eq!(json["error"], PREDICTION_FAILED_MESSAGE);
        assert!(json.get("result").is_none());
    }

    // Scenario C: a risk label outside the closed set is a malformed
    // response — indistinguishable from a transport failure.
    #[tokio::test]
    async fn submit_out_of_set_risk_label_fails_uniformly() {
        let reply = r#"{"prediction":"Severe Risk","confidence":0.9,
                        "explanation":"x","recommendations":["A","B","C"]}"#;
        let (app, _core) = test_app(MockRiskModel::replying(reply));
        let response = app
            .oneshot(post_json("/api/assessment", SCENARIO_RECORD))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["phase"], "settled");
        assert_eq!(json["error"], PREDICTION_FAILED_MESSAGE);
        assert!(json.get("result").is_none());
    }

    #[tokio::test]
    async fn submit_reply_missing_explanation_fails_uniformly() {
        let reply = r#"{"prediction":"Low Risk","confidence":0.9}"#;
        let (app, _core) = test_app(MockRiskModel::replying(reply));
        let response = app
            .oneshot(post_json("/api/assessment", SCENARIO_RECORD))
            .await
            .unwrap();

        let json = response_json(response).await;
        assert_eq!(json["error"], PREDICTION_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn submit_rejects_out_of_range_record() {
        let (app, core) = test_app(MockRiskModel::replying(MODERATE_REPLY));
        let body = SCENARIO_RECORD.replace("\"Age\": 50", "\"Age\": 130");
        let response = app
            .oneshot(post_json("/api/assessment", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
        // A rejected record never starts a request.
        assert_eq!(
            core.snapshot().unwrap(),
            crate::core_state::AssessmentSession::Idle
        );
    }

    #[tokio::test]
    async fn submit_rejects_unknown_enum_label_in_record() {
        let (app, _core) = test_app(MockRiskModel::replying(MODERATE_REPLY));
        let body = SCENARIO_RECORD.replace("Asymptomatic", "Crushing");
        let response = app
            .oneshot(post_json("/api/assessment", &body))
            .await
            .unwrap();
        // Closed-vocabulary violation is rejected at deserialization.
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn submit_while_loading_returns_409() {
        let (app, core) = test_app(MockRiskModel::replying(MODERATE_REPLY));
        core.begin().unwrap();

        let response = app
            .oneshot(post_json("/api/assessment", SCENARIO_RECORD))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "REQUEST_IN_FLIGHT");
        // The in-flight request is untouched.
        assert_eq!(
            core.snapshot().unwrap(),
            crate::core_state::AssessmentSession::Loading
        );
    }

    #[tokio::test]
    async fn clear_while_loading_returns_409() {
        let (app, core) = test_app(MockRiskModel::replying(MODERATE_REPLY));
        core.begin().unwrap();

        let response = app
            .oneshot(post_json("/api/assessment/clear", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn full_flow_submit_then_clear_returns_to_idle() {
        let core = Arc::new(CoreState::new());
        let ctx = ApiContext::new(
            core.clone(),
            Arc::new(MockRiskModel::replying(MODERATE_REPLY)),
        );

        // Submit settles the session with a result.
        let response = api_router(ctx.clone())
            .oneshot(post_json("/api/assessment", SCENARIO_RECORD))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // The snapshot endpoint observes the settled result.
        let response = api_router(ctx.clone())
            .oneshot(get_request("/api/assessment"))
            .await
            .unwrap();
        let json = response_json(response).await;
        assert_eq!(json["phase"], "settled");
        assert_eq!(json["result"]["risk"], "Moderate Risk");

        // Clear discards it and returns to form entry.
        let response = api_router(ctx.clone())
            .oneshot(post_json("/api/assessment/clear", ""))
            .await
            .unwrap();
        let json = response_json(response).await;
        assert_eq!(json["phase"], "idle");
        assert!(json.get("result").is_none());
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn resubmission_after_failure_recovers() {
        // First attempt fails; the only recovery path is re-submission.
        let core = Arc::new(CoreState::new());
        let failing = ApiContext::new(core.clone(), Arc::new(MockRiskModel::failing()));
        let response = api_router(failing)
            .oneshot(post_json("/api/assessment", SCENARIO_RECORD))
            .await
            .unwrap();
        assert_eq!(response_json(response).await["error"], PREDICTION_FAILED_MESSAGE);

        // Second attempt against a healthy service replaces the error.
        let healthy = ApiContext::new(
            core.clone(),
            Arc::new(MockRiskModel::replying(MODERATE_REPLY)),
        );
        let response = api_router(healthy)
            .oneshot(post_json("/api/assessment", SCENARIO_RECORD))
            .await
            .unwrap();
        let json = response_json(response).await;
        assert_eq!(json["result"]["risk"], "Moderate Risk");
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn not_found_for_unknown_route() {
        let (app, _core) = test_app(MockRiskModel::replying(MODERATE_REPLY));
        let response = app
            .oneshot(get_request("/api/nonexistent"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
