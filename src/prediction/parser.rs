//! Runtime validation of the service reply — the single gate between
//! external JSON and the trusted [`RiskAssessment`] shape.

use std::str::FromStr;

use serde::Deserialize;

use super::PredictionError;
use crate::models::{RiskAssessment, RiskLevel};

/// Reply shape before validation. Every field optional: presence is a
/// checked property, not a type assertion on untrusted JSON.
#[derive(Deserialize)]
struct RawAssessment {
    prediction: Option<String>,
    confidence: Option<f64>,
    explanation: Option<String>,
    recommendations: Option<Vec<String>>,
}

/// Parse and validate the model's reply text.
///
/// Checks, in order: well-formed JSON; `prediction` present, non-empty,
/// and inside the closed risk set; `explanation` present and non-empty;
/// `confidence` present and within [0.0, 1.0]. Values that pass are
/// returned unchanged — no clamping, no lossy transform. A missing
/// `recommendations` array is tolerated as empty.
pub fn parse_assessment(reply: &str) -> Result<RiskAssessment, PredictionError> {
    let raw: RawAssessment = serde_json::from_str(reply.trim())
        .map_err(|e| PredictionError::JsonParsing(e.to_string()))?;

    let label = raw
        .prediction
        .filter(|s| !s.trim().is_empty())
        .ok_or(PredictionError::IncompleteReply("prediction"))?;
    let prediction = RiskLevel::from_str(&label)
        .map_err(|_| PredictionError::UnknownRiskLevel(label))?;

    let explanation = raw
        .explanation
        .filter(|s| !s.trim().is_empty())
        .ok_or(PredictionError::IncompleteReply("explanation"))?;

    let confidence = raw
        .confidence
        .ok_or(PredictionError::IncompleteReply("confidence"))?;
    if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
        return Err(PredictionError::ConfidenceOutOfRange(confidence));
    }

    Ok(RiskAssessment {
        prediction,
        confidence,
        explanation,
        recommendations: raw.recommendations.unwrap_or_default(),
    })
}
