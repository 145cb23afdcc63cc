//! Assessment session endpoints.
//!
//! - `POST /api/assessment` — submit a patient record for assessment
//! - `GET  /api/assessment` — current session snapshot
//! - `POST /api/assessment/clear` — discard the outcome, back to the form
//!
//! A failed prediction settles the session with the fixed user-facing
//! message and is returned as a 200 snapshot, never as an HTTP error.
//! Only protocol-level problems (invalid record, concurrent submit) map
//! to error statuses.

use axum::extract::State;
use axum::Json;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SessionView};
use crate::models::PatientRecord;
use crate::prediction;

/// `POST /api/assessment` — run one prediction for the submitted record.
///
/// Suspends until the external service responds; the session is
/// observable as "loading" for the duration. A submit while a request is
/// already in flight is rejected with 409 and does not disturb it.
pub async fn submit(
    State(ctx): State<ApiContext>,
    Json(record): Json<PatientRecord>,
) -> Result<Json<SessionView>, ApiError> {
    record.validate()?;
    ctx.core.begin()?;

    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, "assessment request accepted");

    // The model client is blocking; bridge it off the async worker.
    let model = ctx.model.clone();
    let outcome =
        tokio::task::spawn_blocking(move || prediction::assess_patient(model.as_ref(), &record))
            .await;

    match outcome {
        Ok(Ok(assessment)) => {
            tracing::info!(%request_id, risk = %assessment.prediction, "assessment settled");
            ctx.core.settle_ok(assessment);
        }
        Ok(Err(e)) => {
            // Cause stays in the logs; the user sees one fixed message.
            tracing::warn!(%request_id, error = %e, "prediction failed");
            ctx.core.settle_failed();
        }
        Err(e) => {
            tracing::error!(%request_id, error = %e, "prediction task aborted");
            ctx.core.settle_failed();
        }
    }

    let snapshot = ctx.core.snapshot()?;
    Ok(Json(SessionView::from_session(&snapshot)))
}

/// `GET /api/assessment` — observable session state.
pub async fn current(State(ctx): State<ApiContext>) -> Result<Json<SessionView>, ApiError> {
    let snapshot = ctx.core.snapshot()?;
    Ok(Json(SessionView::from_session(&snapshot)))
}

/// `POST /api/assessment/clear` — Settled -> Idle.
pub async fn clear(State(ctx): State<ApiContext>) -> Result<Json<SessionView>, ApiError> {
    ctx.core.clear()?;
    let snapshot = ctx.core.snapshot()?;
    Ok(Json(SessionView::from_session(&snapshot)))
}
