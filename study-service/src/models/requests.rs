//! Inbound request bodies.
//!
//! Every field is optional and loosely typed: whatever JSON value the caller
//! sends is kept as-is and rendered into the prompt, and echoed back
//! unchanged. An explicit `null` counts as absent. Unknown fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A request field value of any JSON type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValue(pub Value);

impl FieldValue {
    /// `field`, or `default` when the caller left it out.
    pub fn or(field: Option<FieldValue>, default: impl Into<FieldValue>) -> FieldValue {
        field.unwrap_or_else(|| default.into())
    }

    /// The value's JSON text, for use as a lookup key. `1` and `"1"` give
    /// different keys. Arrays and objects have none.
    pub fn as_key(&self) -> Option<String> {
        match &self.0 {
            Value::Array(_) | Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }
}

/// Strings render without quotes; everything else as compact JSON.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue(Value::String(value.to_string()))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue(Value::from(value))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<FieldValue>,
    #[serde(default)]
    pub session_id: Option<FieldValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StudyPlanRequest {
    #[serde(default)]
    pub subject: Option<FieldValue>,
    /// Plan length in days.
    #[serde(default)]
    pub duration: Option<FieldValue>,
    #[serde(default)]
    pub hours_per_day: Option<FieldValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub topic: Option<FieldValue>,
    #[serde(default)]
    pub num_questions: Option<FieldValue>,
    #[serde(default)]
    pub difficulty: Option<FieldValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExplainRequest {
    #[serde(default)]
    pub concept: Option<FieldValue>,
    /// beginner, intermediate or advanced; not enforced.
    #[serde(default)]
    pub level: Option<FieldValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CodeReviewRequest {
    #[serde(default)]
    pub code: Option<FieldValue>,
    #[serde(default)]
    pub language: Option<FieldValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResourcesRequest {
    #[serde(default)]
    pub topic: Option<FieldValue>,
    /// videos, articles, books or all; not enforced.
    #[serde(default, rename = "type")]
    pub resource_type: Option<FieldValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_display_without_quotes() {
        assert_eq!(FieldValue::from("Rust").to_string(), "Rust");
        assert_eq!(FieldValue(json!(14)).to_string(), "14");
        assert_eq!(FieldValue(json!(["a", 1])).to_string(), r#"["a",1]"#);
    }

    #[test]
    fn keys_keep_json_types_apart() {
        assert_eq!(FieldValue::from("1").as_key().unwrap(), r#""1""#);
        assert_eq!(FieldValue(json!(1)).as_key().unwrap(), "1");
        assert_eq!(FieldValue(json!(true)).as_key().unwrap(), "true");
        assert!(FieldValue(json!(["a"])).as_key().is_none());
        assert!(FieldValue(json!({ "id": 1 })).as_key().is_none());
    }

    #[test]
    fn missing_and_null_fields_are_absent() {
        let req: StudyPlanRequest =
            serde_json::from_value(json!({ "subject": "Chemistry", "duration": null })).unwrap();

        assert_eq!(req.subject, Some(FieldValue::from("Chemistry")));
        assert!(req.duration.is_none());
        assert!(req.hours_per_day.is_none());
        assert_eq!(FieldValue::or(req.duration, 7_i64).to_string(), "7");
    }

    #[test]
    fn wrong_types_are_kept() {
        let req: QuizRequest =
            serde_json::from_value(json!({ "topic": "cells", "num_questions": "ten" })).unwrap();
        assert_eq!(req.num_questions, Some(FieldValue::from("ten")));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let req: ExplainRequest =
            serde_json::from_value(json!({ "concept": "recursion", "extra": true })).unwrap();
        assert_eq!(req.concept, Some(FieldValue::from("recursion")));
    }

    #[test]
    fn resource_type_reads_the_type_field() {
        let req: ResourcesRequest =
            serde_json::from_value(json!({ "topic": "Rust", "type": "books" })).unwrap();
        assert_eq!(req.resource_type, Some(FieldValue::from("books")));
    }
}
