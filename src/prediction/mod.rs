//! Prediction client — renders a patient record into a prompt, calls the
//! hosted generative model, and validates the structured reply.
//!
//! Failure taxonomy is internally tagged for diagnostics but collapsed at
//! this boundary: callers learn only that prediction failed; the cause is
//! logged and never shown to the user.

pub mod gemini;
pub mod parser;
pub mod prompt;

pub use gemini::{GeminiClient, MockRiskModel, RiskModel};
pub use parser::parse_assessment;
pub use prompt::{build_assessment_prompt, render_patient_summary, response_schema};

use thiserror::Error;

use crate::models::{PatientRecord, RiskAssessment};

/// The one fixed message shown to the user when a prediction fails,
/// independent of the underlying cause.
pub const PREDICTION_FAILED_MESSAGE: &str =
    "An error occurred while making the prediction. Please check your API key and try again.";

/// Internal causes of a failed prediction. Diagnostic only — every
/// variant is surfaced to the user as [`PREDICTION_FAILED_MESSAGE`].
#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("no API key configured (set {0})")]
    MissingCredential(&'static str),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("prediction service returned status {status}: {body}")]
    ServiceStatus { status: u16, body: String },

    #[error("model reply is not valid JSON: {0}")]
    JsonParsing(String),

    #[error("malformed model reply: {0}")]
    MalformedReply(String),

    #[error("model reply missing required field: {0}")]
    IncompleteReply(&'static str),

    #[error("risk level outside the closed set: {0}")]
    UnknownRiskLevel(String),

    #[error("confidence outside [0.0, 1.0]: {0}")]
    ConfidenceOutOfRange(f64),
}

/// Run one assessment: render the prompt, issue exactly one call to the
/// model, parse and validate the reply.
///
/// No retries, no caching. The returned assessment carries the service's
/// values unchanged.
pub fn assess_patient(
    model: &dyn RiskModel,
    record: &PatientRecord,
) -> Result<RiskAssessment, PredictionError> {
    let prompt = build_assessment_prompt(record);
    tracing::debug!(
        model = model.model_name(),
        prompt_chars = prompt.len(),
        "requesting risk assessment"
    );

    let reply = model.generate(&prompt)?;
    let assessment = parse_assessment(&reply)?;

    tracing::info!(
        risk = %assessment.prediction,
        confidence = assessment.confidence,
        "risk assessment received"
    );
    Ok(assessment)
}
