//! Prompt rendering and the structured-output schema sent to the model.

use crate::models::{PatientRecord, RiskLevel};

/// Render the patient record as labeled lines, one per field, with
/// binary flags as "Yes"/"No" rather than 0/1.
pub fn render_patient_summary(record: &PatientRecord) -> String {
    format!(
        "- Age: {}\n\
         - Sex: {}\n\
         - Chest Pain Type: {}\n\
         - Resting Blood Pressure (mm Hg): {}\n\
         - Cholesterol (mm/dl): {}\n\
         - Fasting Blood Sugar > 120 mg/dl: {}\n\
         - Resting Electrocardiogram Results: {}\n\
         - Maximum Heart Rate Achieved: {}\n\
         - Exercise Induced Angina: {}\n\
         - Oldpeak (ST depression induced by exercise relative to rest): {}\n\
         - The slope of the peak exercise ST segment: {}",
        record.age,
        record.sex.as_str(),
        record.chest_pain_type.as_str(),
        record.resting_bp,
        record.cholesterol,
        record.fasting_bs_label(),
        record.resting_ecg.as_str(),
        record.max_hr,
        record.exercise_angina.as_str(),
        record.oldpeak,
        record.st_slope.as_str(),
    )
}

/// Build the full prompt: instruction preamble plus the patient data block.
pub fn build_assessment_prompt(record: &PatientRecord) -> String {
    format!(
        "Analyze the following patient data to predict the risk of heart disease.\n\
         The prediction should be one of \"Low Risk\", \"Moderate Risk\", or \"High Risk\".\n\
         Provide a confidence score, a detailed explanation for your reasoning, and a list \
         of actionable recommendations.\n\
         \n\
         Patient Data:\n\
         {}",
        render_patient_summary(record)
    )
}

/// The machine-checkable response schema requested from the service:
/// a JSON object with exactly the four assessment keys, the risk level
/// constrained to the closed set.
pub fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "prediction": {
                "type": "STRING",
                "enum": RiskLevel::labels(),
                "description": "The predicted risk level for heart disease.",
            },
            "confidence": {
                "type": "NUMBER",
                "description": "A confidence score for the prediction, from 0.0 to 1.0.",
            },
            "explanation": {
                "type": "STRING",
                "description": "A detailed explanation of why this prediction was made, \
                                highlighting key factors from the input data.",
            },
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of 3-5 actionable recommendations for the patient \
                                based on the prediction.",
            },
        },
        "required": ["prediction", "confidence", "explanation", "recommendations"],
    })
}
