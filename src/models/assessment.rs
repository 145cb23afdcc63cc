use serde::{Deserialize, Serialize};

use super::enums::RiskLevel;

/// The structured risk assessment produced by the prediction service.
///
/// Built only by the prediction client's parser — the single gate
/// between external JSON and this trusted shape. Field values are
/// carried through from the service unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub prediction: RiskLevel,
    /// Confidence in the closed unit interval [0.0, 1.0].
    pub confidence: f64,
    pub explanation: String,
    /// 3-5 entries expected, not enforced.
    pub recommendations: Vec<String>,
}

impl RiskAssessment {
    /// Confidence as a whole-number percentage, e.g. `0.72` -> `"72%"`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.0}%", self.confidence * 100.0)
    }
}
