use axum::Json;
use serde::Serialize;

use crate::models::{intake_fields, IntakeField, PatientRecord};

#[derive(Serialize)]
pub struct IntakeResponse {
    /// The eleven field descriptors, in display order.
    pub fields: Vec<IntakeField>,
    /// The pre-populated values of a fresh form session.
    pub defaults: PatientRecord,
}

/// `GET /api/intake` — the form contract: what to collect, how to label
/// it, and which values are plausible.
pub async fn fields() -> Json<IntakeResponse> {
    Json(IntakeResponse {
        fields: intake_fields(),
        defaults: PatientRecord::default(),
    })
}
