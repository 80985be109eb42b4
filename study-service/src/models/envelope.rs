//! Outbound response envelopes.
//!
//! Successful calls return `success: true` with a kind-specific payload field
//! and echoed inputs (after defaults). Failures share [`ErrorEnvelope`].

use super::FieldValue;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Current time as an RFC 3339 string with microsecond precision.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct StudyPlanResponse {
    pub success: bool,
    pub study_plan: String,
    pub subject: FieldValue,
    pub duration: FieldValue,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    /// Model output, relayed as text even when it looks like JSON.
    pub quiz: String,
    pub topic: FieldValue,
    pub num_questions: FieldValue,
}

#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub success: bool,
    pub explanation: String,
    pub concept: FieldValue,
}

#[derive(Debug, Serialize)]
pub struct CodeReviewResponse {
    pub success: bool,
    pub review: String,
    pub language: FieldValue,
}

#[derive(Debug, Serialize)]
pub struct ResourcesResponse {
    pub success: bool,
    pub resources: String,
    pub topic: FieldValue,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serde_json::json;

    #[test]
    fn timestamp_is_rfc3339() {
        assert!(DateTime::parse_from_rfc3339(&now_timestamp()).is_ok());
    }

    #[test]
    fn error_envelope_shape() {
        let body = serde_json::to_value(ErrorEnvelope::new("quota exceeded")).unwrap();
        assert_eq!(body, json!({ "success": false, "error": "quota exceeded" }));
    }

    #[test]
    fn echoed_fields_keep_their_json_type() {
        let body = serde_json::to_value(QuizResponse {
            success: true,
            quiz: "[]".to_string(),
            topic: FieldValue::from("cells"),
            num_questions: FieldValue::from(5_i64),
        })
        .unwrap();

        assert_eq!(body["num_questions"], json!(5));
        assert_eq!(body["quiz"], json!("[]"));
    }
}
