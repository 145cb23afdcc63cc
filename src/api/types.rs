//! Shared API context and the JSON views served to the client.

use std::sync::Arc;

use serde::Serialize;

use crate::core_state::{AssessmentSession, CoreState, SessionOutcome};
use crate::models::RiskAssessment;
use crate::prediction::RiskModel;

/// Shared state handed to every endpoint: the session controller and the
/// prediction model behind its seam, so tests can swap in a mock.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
    pub model: Arc<dyn RiskModel>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>, model: Arc<dyn RiskModel>) -> Self {
        Self { core, model }
    }
}

/// Observable session state for the client. At most one of `result` and
/// `error` is present, and only when `phase` is "settled".
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub phase: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AssessmentView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SessionView {
    pub fn from_session(session: &AssessmentSession) -> Self {
        match session {
            AssessmentSession::Idle => Self {
                phase: "idle",
                result: None,
                error: None,
            },
            AssessmentSession::Loading => Self {
                phase: "loading",
                result: None,
                error: None,
            },
            AssessmentSession::Settled(SessionOutcome::Assessed(assessment)) => Self {
                phase: "settled",
                result: Some(AssessmentView::from_assessment(assessment)),
                error: None,
            },
            AssessmentSession::Settled(SessionOutcome::Failed(message)) => Self {
                phase: "settled",
                result: None,
                error: Some(message.clone()),
            },
        }
    }
}

/// The result view: the assessment values unchanged, plus the
/// display-ready percentage.
#[derive(Debug, Serialize)]
pub struct AssessmentView {
    pub risk: &'static str,
    pub confidence: f64,
    pub confidence_percent: String,
    pub explanation: String,
    pub recommendations: Vec<String>,
}

impl AssessmentView {
    pub fn from_assessment(assessment: &RiskAssessment) -> Self {
        Self {
            risk: assessment.prediction.as_str(),
            confidence: assessment.confidence,
            confidence_percent: assessment.confidence_percent(),
            explanation: assessment.explanation.clone(),
            recommendations: assessment.recommendations.clone(),
        }
    }
}
