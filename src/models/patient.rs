//! The eleven-field patient record and the intake form contract.
//!
//! Field names on the wire follow the clinical dataset convention
//! (`Age`, `RestingBP`, `ST_Slope`, …). Enumerated fields deserialize
//! through the closed vocabularies in [`super::enums`], so shape and
//! vocabulary are checked before a record ever reaches the prediction
//! client; `validate()` adds finiteness and plausible-range checks.

use serde::{Deserialize, Serialize};

use super::enums::{ChestPainType, ExerciseAngina, RestingEcg, Sex, StSlope};
use super::DomainError;

// Plausible clinical ranges, also served as intake metadata.
const AGE_RANGE: (f64, f64) = (1.0, 120.0);
const RESTING_BP_RANGE: (f64, f64) = (50.0, 250.0);
const CHOLESTEROL_RANGE: (f64, f64) = (50.0, 600.0);
const MAX_HR_RANGE: (f64, f64) = (60.0, 220.0);
const OLDPEAK_RANGE: (f64, f64) = (-3.0, 7.0);

/// One patient's clinical metrics, created fresh per form session and
/// consumed exactly once per submission. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Sex")]
    pub sex: Sex,
    #[serde(rename = "ChestPainType")]
    pub chest_pain_type: ChestPainType,
    /// Resting blood pressure, mm Hg.
    #[serde(rename = "RestingBP")]
    pub resting_bp: u32,
    /// Serum cholesterol, mm/dl.
    #[serde(rename = "Cholesterol")]
    pub cholesterol: u32,
    /// Fasting blood sugar > 120 mg/dl: 1 for true, 0 for false.
    #[serde(rename = "FastingBS")]
    pub fasting_bs: u8,
    #[serde(rename = "RestingECG")]
    pub resting_ecg: RestingEcg,
    /// Maximum heart rate achieved.
    #[serde(rename = "MaxHR")]
    pub max_hr: u32,
    #[serde(rename = "ExerciseAngina")]
    pub exercise_angina: ExerciseAngina,
    /// ST depression induced by exercise relative to rest.
    #[serde(rename = "Oldpeak")]
    pub oldpeak: f64,
    #[serde(rename = "ST_Slope")]
    pub st_slope: StSlope,
}

impl Default for PatientRecord {
    /// The pre-populated form values of a fresh session.
    fn default() -> Self {
        Self {
            age: 50,
            sex: Sex::Male,
            chest_pain_type: ChestPainType::Asymptomatic,
            resting_bp: 120,
            cholesterol: 200,
            fasting_bs: 0,
            resting_ecg: RestingEcg::Normal,
            max_hr: 150,
            exercise_angina: ExerciseAngina::No,
            oldpeak: 1.0,
            st_slope: StSlope::Flat,
        }
    }
}

impl PatientRecord {
    /// The fasting blood sugar flag as a human-readable label.
    pub fn fasting_bs_label(&self) -> &'static str {
        if self.fasting_bs == 1 {
            "Yes"
        } else {
            "No"
        }
    }

    /// Check finiteness and plausible clinical ranges.
    ///
    /// Shape and vocabulary are already enforced by deserialization;
    /// this rejects values a form with the documented ranges could not
    /// have produced.
    pub fn validate(&self) -> Result<(), DomainError> {
        in_range("Age", self.age as f64, AGE_RANGE)?;
        in_range("RestingBP", self.resting_bp as f64, RESTING_BP_RANGE)?;
        in_range("Cholesterol", self.cholesterol as f64, CHOLESTEROL_RANGE)?;
        in_range("MaxHR", self.max_hr as f64, MAX_HR_RANGE)?;

        if self.fasting_bs > 1 {
            return Err(DomainError::OutOfRange {
                field: "FastingBS",
                value: self.fasting_bs.to_string(),
            });
        }

        if !self.oldpeak.is_finite() {
            return Err(DomainError::NotFinite { field: "Oldpeak" });
        }
        in_range("Oldpeak", self.oldpeak, OLDPEAK_RANGE)?;

        Ok(())
    }
}

fn in_range(field: &'static str, value: f64, (lo, hi): (f64, f64)) -> Result<(), DomainError> {
    if value < lo || value > hi {
        return Err(DomainError::OutOfRange {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// One entry of the intake form contract: what to collect, how to label
/// it, and which values are plausible.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeField {
    pub name: &'static str,
    pub label: &'static str,
    /// "number" or "select".
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl IntakeField {
    fn number(
        name: &'static str,
        label: &'static str,
        example: &'static str,
        (min, max): (f64, f64),
        step: Option<f64>,
    ) -> Self {
        Self {
            name,
            label,
            kind: "number",
            example: Some(example),
            options: None,
            min: Some(min),
            max: Some(max),
            step,
        }
    }

    fn select(name: &'static str, label: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            name,
            label,
            kind: "select",
            example: None,
            options: Some(options),
            min: None,
            max: None,
            step: None,
        }
    }
}

/// The intake form descriptors for all eleven fields, in display order.
pub fn intake_fields() -> Vec<IntakeField> {
    vec![
        IntakeField::number("Age", "Age", "e.g., 55", AGE_RANGE, None),
        IntakeField::select("Sex", "Sex", Sex::labels()),
        IntakeField::number(
            "RestingBP",
            "Resting Blood Pressure (mm Hg)",
            "e.g., 120",
            RESTING_BP_RANGE,
            None,
        ),
        IntakeField::number(
            "Cholesterol",
            "Cholesterol (mm/dl)",
            "e.g., 200",
            CHOLESTEROL_RANGE,
            None,
        ),
        IntakeField::number("MaxHR", "Maximum Heart Rate", "e.g., 150", MAX_HR_RANGE, None),
        IntakeField::number(
            "Oldpeak",
            "Oldpeak (ST)",
            "e.g., 1.0",
            OLDPEAK_RANGE,
            Some(0.1),
        ),
        IntakeField::select("ChestPainType", "Chest Pain Type", ChestPainType::labels()),
        IntakeField::select(
            "FastingBS",
            "Fasting Blood Sugar > 120 mg/dl",
            &["No", "Yes"],
        ),
        IntakeField::select("RestingECG", "Resting ECG", RestingEcg::labels()),
        IntakeField::select(
            "ExerciseAngina",
            "Exercise-Induced Angina",
            ExerciseAngina::labels(),
        ),
        IntakeField::select("ST_Slope", "ST Slope", StSlope::labels()),
    ]
}
